//! Replaying a season gameweek by gameweek.
//!
//! Each gameweek runs the same pipeline:
//!
//! 1. price the pool, with owned players at their selling price
//! 2. [`advance`] the state machine to get budget, limits and lookahead
//! 3. select a squad on predictions aggregated over the lookahead window
//! 4. book the squad, bank and purchase prices
//! 5. select lineup and captaincy for this gameweek alone, keeping the squad fixed
//! 6. apply results: automatic substitutions, then captain failover
//! 7. score the gameweek
//!
//! Gameweeks depend on each other through [`SeasonState`], so a season runs strictly in
//! order and a finished gameweek is never revisited. A gameweek that fails at any step
//! leaves the state untouched.

use std::collections::HashMap;

use footbot_engine::{
    Captaincy, ElementId, EngineError, Lineup, Player, PointsBreakdown, Price, PriceTable,
    Substitution, TransferCount, apply_substitutions, gameweek_points, resolve_captaincy,
};
use footbot_optimizer::{SelectionParams, Solver, SquadSelection, Transfers, select_squad};
use serde::{Deserialize, Serialize};

use crate::{
    SimulationError,
    aggregate::aggregate_predictions,
    chip::{ActiveChip, ChipSchedule},
    config::SimulationConfig,
    provider::Providers,
    state::SeasonState,
    transfer::{GameweekPlan, advance},
};

/// What happened in one simulated gameweek.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameweekOutcome {
    pub event: u32,
    pub chip: ActiveChip,
    pub budget: Price,
    pub bank: Price,
    /// Value of the squad at selling prices.
    pub team_value: Price,
    pub transfers: Transfers,
    pub free_transfers: u32,
    /// Lineup and captaincy as selected, before results.
    pub lineup: Lineup,
    pub captaincy: Captaincy,
    pub substitutions: Vec<Substitution>,
    /// First team that actually scored, after substitutions.
    pub playing_first_team: Vec<ElementId>,
    /// Captaincy after failover.
    pub playing_captaincy: Captaincy,
    pub points: PointsBreakdown,
}

/// Best or worst gameweek of a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameweekScore {
    pub event: u32,
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub gameweeks: usize,
    pub total_points: i64,
    pub mean_points: f64,
    pub best: Option<GameweekScore>,
    pub worst: Option<GameweekScore>,
    pub transfers_made: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonResult {
    pub season: String,
    pub gameweeks: Vec<GameweekOutcome>,
}

impl SeasonResult {
    #[must_use]
    pub fn total_points(&self) -> i64 {
        self.gameweeks
            .iter()
            .map(|g| i64::from(g.points.total))
            .sum()
    }

    #[must_use]
    pub fn summary(&self) -> SeasonSummary {
        let scores = self.gameweeks.iter().map(|g| GameweekScore {
            event: g.event,
            points: g.points.total,
        });
        let total_points = self.total_points();
        #[expect(clippy::cast_precision_loss)]
        let mean_points = if self.gameweeks.is_empty() {
            0.0
        } else {
            total_points as f64 / self.gameweeks.len() as f64
        };
        SeasonSummary {
            gameweeks: self.gameweeks.len(),
            total_points,
            mean_points,
            // earliest gameweek wins ties
            best: scores.clone().rev().max_by_key(|s| s.points),
            worst: scores.min_by_key(|s| s.points),
            transfers_made: self.gameweeks.iter().map(|g| g.transfers.count()).sum(),
        }
    }
}

/// Steps a single season forward one gameweek at a time.
pub struct SeasonSimulator<'a> {
    season: String,
    providers: Providers<'a>,
    solver: &'a dyn Solver,
    config: SimulationConfig,
    schedule: ChipSchedule,
    state: SeasonState,
    next_event: u32,
}

impl<'a> SeasonSimulator<'a> {
    /// Checks `config` and `schedule` up front, so that a misconfigured season fails
    /// before any gameweek is played.
    pub fn new(
        season: impl Into<String>,
        providers: Providers<'a>,
        solver: &'a dyn Solver,
        config: SimulationConfig,
        schedule: ChipSchedule,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        schedule.validate()?;
        Ok(Self {
            season: season.into(),
            providers,
            solver,
            config,
            schedule,
            state: SeasonState::new(),
            next_event: 1,
        })
    }

    #[must_use]
    pub fn state(&self) -> &SeasonState {
        &self.state
    }

    #[must_use]
    pub fn next_event(&self) -> u32 {
        self.next_event
    }

    fn select(
        &self,
        plan: &GameweekPlan,
        players: &[Player],
        params: &SelectionParams<'_>,
    ) -> Result<SquadSelection, SimulationError> {
        select_squad(players, params, self.solver).map_err(|source| SimulationError::Selection {
            event: plan.event,
            source,
        })
    }

    /// Simulates the next gameweek.
    ///
    /// On error the season state is left as it was, so the same gameweek can be tried
    /// again.
    #[expect(clippy::cast_possible_truncation, clippy::too_many_lines)]
    pub fn simulate_gameweek(&mut self) -> Result<GameweekOutcome, SimulationError> {
        let event = self.next_event;
        let market_players = self.providers.pool.players(&self.season, event)?;
        let market = PriceTable::from_players(&market_players);

        // committed only once the whole gameweek has succeeded
        let mut state = self.state.clone();
        let plan = advance(event, &mut state, &self.schedule, &self.config, &market)?;
        let effective = state.ledger().effective_prices(&market)?;
        let mut players = market_players;
        effective.apply_to(&mut players)?;

        let predictions = self.providers.predictions.predictions(&self.season, event)?;
        let window = aggregate_predictions(
            &predictions,
            event,
            event + plan.lookahead,
            self.config.aggregation,
        );
        let unpredicted = players
            .iter()
            .filter(|p| !window.contains_key(&p.element))
            .count();
        if unpredicted > 0 {
            log::warn!(
                "gameweek {event}: no prediction for {unpredicted} player(s), scoring them 0"
            );
        }

        let existing = state
            .existing_squad()
            .map(|s| s.elements().to_vec())
            .unwrap_or_default();
        let selection = self.select(
            &plan,
            &with_scores(&players, &window),
            &SelectionParams {
                existing_squad: &existing,
                budget: plan.budget,
                weights: self.config.weights,
                transfer_penalty: plan.transfer_penalty,
                transfer_limit: plan.transfer_limit,
            },
        )?;
        let transfers = selection.transfers;
        let squad = selection.lineup.squad();
        let bank = state.record_selection(
            squad.clone(),
            transfers.count() as u32,
            &plan,
            &effective,
            &market,
        )?;
        log::debug!(
            "gameweek {event}: transfers in {:?}, out {:?}",
            transfers.transfers_in,
            transfers.transfers_out
        );

        let this_week = aggregate_predictions(&predictions, event, event, self.config.aggregation);
        let SquadSelection {
            lineup, captaincy, ..
        } = self.select(
            &plan,
            &with_scores(&players, &this_week),
            &SelectionParams {
                existing_squad: squad.elements(),
                budget: plan.budget,
                weights: self.config.weights,
                transfer_penalty: 0.0,
                transfer_limit: 0,
            },
        )?;

        let results = self.providers.results.results(&self.season, event)?;
        let by_element = players
            .iter()
            .map(|p| (p.element, p))
            .collect::<HashMap<_, _>>();
        let played = |elements: &[ElementId]| {
            elements
                .iter()
                .map(|&e| -> Result<Player, EngineError> {
                    let player = by_element.get(&e).ok_or(EngineError::MissingPlayer(e))?;
                    Ok(Player {
                        result: Some(results.get(&e).copied().unwrap_or_default()),
                        ..(*player).clone()
                    })
                })
                .collect::<Result<Vec<_>, _>>()
        };
        let substituted =
            apply_substitutions(&played(lineup.first_team())?, &played(lineup.bench())?);
        for sub in &substituted.substitutions {
            log::debug!("gameweek {event}: {} replaces {}", sub.on, sub.out);
        }
        let playing_captaincy = resolve_captaincy(captaincy, &substituted.first_team);
        if playing_captaincy != captaincy {
            log::debug!(
                "gameweek {event}: captaincy {:?} -> {:?}",
                captaincy.captain,
                playing_captaincy.captain
            );
        }

        let points = gameweek_points(
            &substituted.first_team,
            &substituted.bench,
            &playing_captaincy,
            TransferCount {
                made: transfers.count() as u32,
                free: plan.free_transfers,
            },
            plan.chip.scoring_modifiers(),
            &self.config.scoring,
        );
        log::info!(
            "gameweek {event}: {} points, {} transfer(s), chip {}, bank {bank}",
            points.total,
            transfers.count(),
            plan.chip
        );

        self.state = state;
        self.next_event += 1;
        Ok(GameweekOutcome {
            event,
            chip: plan.chip,
            budget: plan.budget,
            bank,
            team_value: plan.budget - bank,
            transfers,
            free_transfers: plan.free_transfers,
            lineup,
            captaincy,
            substitutions: substituted.substitutions,
            playing_first_team: substituted.first_team.iter().map(|p| p.element).collect(),
            playing_captaincy,
            points,
        })
    }

    /// Simulates every remaining gameweek up to and including `last_event`.
    pub fn run(mut self, last_event: u32) -> Result<SeasonResult, SimulationError> {
        let mut gameweeks = vec![];
        while self.next_event <= last_event {
            gameweeks.push(self.simulate_gameweek()?);
        }
        Ok(SeasonResult {
            season: self.season,
            gameweeks,
        })
    }
}

/// Copy of `players` with `predicted_score` taken from `scores` (0 when absent).
fn with_scores(players: &[Player], scores: &HashMap<ElementId, f64>) -> Vec<Player> {
    players
        .iter()
        .map(|p| {
            p.clone()
                .with_predicted_score(scores.get(&p.element).copied().unwrap_or(0.0))
        })
        .collect()
}

/// Simulates gameweeks `1..=last_event` of `season`.
pub fn simulate_season(
    season: &str,
    providers: Providers<'_>,
    solver: &dyn Solver,
    config: &SimulationConfig,
    schedule: &ChipSchedule,
    last_event: u32,
) -> Result<SeasonResult, SimulationError> {
    if last_event == 0 {
        return Err(SimulationError::InvalidArgument(
            "a season needs at least one gameweek".into(),
        ));
    }
    log::info!("simulating season {season}, gameweeks 1..={last_event}");
    SeasonSimulator::new(season, providers, solver, config.clone(), schedule.clone())?
        .run(last_event)
}
