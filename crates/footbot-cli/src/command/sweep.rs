use std::path::PathBuf;

use chrono::{DateTime, Utc};
use footbot_season::{Providers, Scenario, ScenarioResult, SeasonSummary, simulate_sweep};
use serde::Serialize;

use crate::{
    command::simulate::print_summary,
    util::{self, Output, SolverArg},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SweepArg {
    /// Season dataset JSON
    #[arg(long)]
    dataset: PathBuf,
    /// Scenario list JSON: `[{"name": .., "config": .., "schedule": ..}, ..]`
    #[arg(long)]
    scenarios: PathBuf,
    /// Last gameweek to simulate (defaults to the last one in the dataset)
    #[arg(long)]
    last_event: Option<u32>,
    #[clap(flatten)]
    solver: SolverArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ScenarioSummary {
    name: String,
    summary: SeasonSummary,
}

#[derive(Debug, Serialize)]
struct SweepReport {
    simulated_at: DateTime<Utc>,
    summaries: Vec<ScenarioSummary>,
    results: Vec<ScenarioResult>,
}

pub(crate) fn run(arg: &SweepArg) -> anyhow::Result<()> {
    let SweepArg {
        dataset,
        scenarios,
        last_event,
        solver,
        output,
    } = arg;
    let (dataset, dataset_last_event) = util::read_dataset_file(dataset)?;
    let scenarios: Vec<Scenario> = util::read_json_file("scenarios", scenarios)?;
    anyhow::ensure!(!scenarios.is_empty(), "No scenarios to simulate");
    let last_event = last_event.unwrap_or(dataset_last_event);
    let solver = solver.build();

    eprintln!(
        "Simulating {} scenario(s) over gameweeks 1..={last_event}...",
        scenarios.len()
    );
    let results = simulate_sweep(
        &dataset.season,
        Providers::from(&dataset),
        &*solver,
        &scenarios,
        last_event,
    )?;

    let mut summaries = results
        .iter()
        .map(|r| ScenarioSummary {
            name: r.name.clone(),
            summary: r.result.summary(),
        })
        .collect::<Vec<_>>();
    for s in &summaries {
        eprintln!();
        eprintln!("Scenario {}:", s.name);
        print_summary(&s.summary);
    }
    summaries.sort_by_key(|s| std::cmp::Reverse(s.summary.total_points));
    eprintln!();
    eprintln!("Ranking:");
    for (i, s) in summaries.iter().enumerate() {
        eprintln!("  {:2}: {:>6} {}", i + 1, s.summary.total_points, s.name);
    }

    let report = SweepReport {
        simulated_at: Utc::now(),
        summaries,
        results,
    };
    Output::save_json(&report, output.clone())?;
    Ok(())
}
