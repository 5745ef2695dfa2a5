use std::{panic, thread};

use footbot_optimizer::Solver;
use serde::{Deserialize, Serialize};

use crate::{
    SimulationError,
    chip::ChipSchedule,
    config::SimulationConfig,
    provider::Providers,
    simulator::{SeasonResult, simulate_season},
};

/// One configuration to try in a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub config: SimulationConfig,
    #[serde(default)]
    pub schedule: ChipSchedule,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub result: SeasonResult,
}

/// Simulates the same season once per scenario, each on its own thread.
///
/// Seasons are independent of each other. Results come back in scenario order, and the
/// first failing scenario (in that order) fails the whole sweep.
pub fn simulate_sweep(
    season: &str,
    providers: Providers<'_>,
    solver: &dyn Solver,
    scenarios: &[Scenario],
    last_event: u32,
) -> Result<Vec<ScenarioResult>, SimulationError> {
    let mut results = Vec::with_capacity(scenarios.len());
    thread::scope(|s| {
        let handles = scenarios
            .iter()
            .map(|scenario| {
                s.spawn(move || {
                    simulate_season(
                        season,
                        providers,
                        solver,
                        &scenario.config,
                        &scenario.schedule,
                        last_event,
                    )
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            results.push(handle.join().unwrap_or_else(|e| panic::resume_unwind(e)));
        }
    });

    scenarios
        .iter()
        .zip(results)
        .map(|(scenario, result)| {
            let result = result?;
            log::info!(
                "scenario {}: {} points",
                scenario.name,
                result.total_points()
            );
            Ok(ScenarioResult {
                name: scenario.name.clone(),
                result,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use footbot_optimizer::MicroLpSolver;

    use super::*;
    use crate::testing::{Preference, dataset};

    #[test]
    fn test_sweep_matches_sequential_runs() {
        let dataset = dataset([Preference::High, Preference::Low, Preference::High]);
        let providers = Providers::from(&dataset);
        let no_transfers = SimulationConfig {
            transfer_limit: 0,
            ..SimulationConfig::default()
        };
        let scenarios = [
            Scenario {
                name: "hold".into(),
                config: no_transfers.clone(),
                schedule: ChipSchedule::default(),
            },
            Scenario {
                name: "wildcard".into(),
                config: no_transfers,
                schedule: ChipSchedule {
                    wildcard: [2].into(),
                    ..ChipSchedule::default()
                },
            },
        ];

        let results = simulate_sweep("test", providers, &MicroLpSolver, &scenarios, 3).unwrap();
        assert_eq!(results.len(), 2);
        for (scenario, result) in scenarios.iter().zip(&results) {
            assert_eq!(result.name, scenario.name);
            let sequential = simulate_season(
                "test",
                providers,
                &MicroLpSolver,
                &scenario.config,
                &scenario.schedule,
                3,
            )
            .unwrap();
            assert_eq!(result.result, sequential);
        }
    }

    #[test]
    fn test_failing_scenario_fails_sweep() {
        let dataset = dataset([Preference::High; 3]);
        let scenarios = [Scenario {
            name: "broke".into(),
            config: SimulationConfig {
                starting_budget: 100,
                ..SimulationConfig::default()
            },
            schedule: ChipSchedule::default(),
        }];
        let providers = Providers::from(&dataset);
        let result = simulate_sweep("test", providers, &MicroLpSolver, &scenarios, 3);
        assert!(matches!(
            result,
            Err(SimulationError::Selection { event: 1, .. })
        ));
    }
}
