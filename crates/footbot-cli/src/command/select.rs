use std::path::PathBuf;

use chrono::{DateTime, Utc};
use footbot_engine::{ElementId, Pick, Player, Price};
use footbot_optimizer::{ScoringWeights, SelectionParams, SquadSelection, select_squad};
use serde::Serialize;

use crate::util::{self, Output, SolverArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SelectArg {
    /// Player pool JSON: priced players with their predicted score
    #[arg(long)]
    players: PathBuf,
    /// Currently owned elements; omit to build a squad from scratch
    #[arg(long, value_delimiter = ',')]
    existing_squad: Vec<u32>,
    #[arg(long, default_value_t = 1000)]
    budget: Price,
    /// Objective cost per transfer
    #[arg(long, default_value_t = 4.0)]
    transfer_penalty: f64,
    #[arg(long, default_value_t = 1)]
    transfer_limit: usize,
    /// Share of the objective given to bench players; the first team gets the rest
    #[arg(long, default_value_t = ScoringWeights::default().bench)]
    bench_factor: f64,
    /// Share of the captain bonus given to the vice-captain; the captain gets the rest
    #[arg(long, default_value_t = ScoringWeights::default().vice)]
    vice_factor: f64,
    #[clap(flatten)]
    solver: SolverArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SelectionReport {
    selected_at: DateTime<Utc>,
    budget: Price,
    cost: Price,
    selection: SquadSelection,
    picks: Vec<Pick>,
}

impl SelectArg {
    fn weights(&self) -> ScoringWeights {
        ScoringWeights {
            first_team: 1.0 - self.bench_factor,
            bench: self.bench_factor,
            captain: 1.0 - self.vice_factor,
            vice: self.vice_factor,
        }
    }
}

pub(crate) fn run(arg: &SelectArg) -> anyhow::Result<()> {
    let weights = arg.weights();
    let SelectArg {
        players,
        existing_squad,
        budget,
        transfer_penalty,
        transfer_limit,
        bench_factor: _,
        vice_factor: _,
        solver,
        output,
    } = arg;
    let players: Vec<Player> = util::read_json_file("player pool", players)?;
    let existing_squad = existing_squad
        .iter()
        .copied()
        .map(ElementId)
        .collect::<Vec<_>>();

    let params = if existing_squad.is_empty() {
        SelectionParams {
            weights,
            ..SelectionParams::from_scratch(*budget)
        }
    } else {
        SelectionParams {
            existing_squad: &existing_squad,
            budget: *budget,
            weights,
            transfer_penalty: *transfer_penalty,
            transfer_limit: *transfer_limit,
        }
    };
    let solver = solver.build();
    let selection = select_squad(&players, &params, &*solver)?;
    let picks = selection.lineup.picks(&selection.captaincy, &players)?;
    let squad = selection.lineup.squad();
    let cost = players
        .iter()
        .filter(|p| squad.contains(p.element))
        .map(|p| p.price)
        .sum();

    eprintln!("Selected squad (cost {cost} of {budget}):");
    for pick in &picks {
        let marker = if pick.is_captain {
            " (C)"
        } else if pick.is_vice_captain {
            " (V)"
        } else {
            ""
        };
        eprintln!("  {:2}: {}{marker}", pick.slot, pick.element);
    }
    if !existing_squad.is_empty() {
        eprintln!(
            "Transfers in: {:?}, out: {:?}",
            selection.transfers.transfers_in, selection.transfers.transfers_out
        );
    }

    let report = SelectionReport {
        selected_at: Utc::now(),
        budget: *budget,
        cost,
        selection,
        picks,
    };
    Output::save_json(&report, output.clone())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::iter;

    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Cli {
        #[clap(flatten)]
        select: SelectArg,
    }

    fn parse(args: &[&str]) -> SelectArg {
        Cli::parse_from(
            iter::once("select")
                .chain(["--players", "players.json"])
                .chain(args.iter().copied()),
        )
        .select
    }

    #[test]
    fn test_default_weights() {
        let arg = parse(&[]);
        assert_eq!(arg.weights(), ScoringWeights::default());
    }

    #[test]
    fn test_weight_flags() {
        let arg = parse(&["--bench-factor", "0.25", "--vice-factor", "0.5"]);
        let weights = arg.weights();
        assert_eq!(
            weights,
            ScoringWeights {
                first_team: 0.75,
                bench: 0.25,
                captain: 0.5,
                vice: 0.5,
            }
        );
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_factor_is_rejected() {
        let arg = parse(&["--bench-factor", "1.5"]);
        assert!(arg.weights().validate().is_err());
    }
}
