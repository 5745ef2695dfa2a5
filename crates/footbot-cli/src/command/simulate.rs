use std::path::PathBuf;

use chrono::{DateTime, Utc};
use footbot_engine::Price;
use footbot_season::{
    Aggregation, ChipSchedule, Providers, SeasonResult, SeasonSummary, SimulationConfig,
    simulate_season,
};
use serde::Serialize;

use crate::util::{self, Output, SolverArg};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ConfigArg {
    /// Simulation config JSON; fields it leaves out keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    starting_budget: Option<Price>,
    /// Objective cost per transfer
    #[arg(long)]
    transfer_penalty: Option<f64>,
    /// Most transfers per ordinary gameweek
    #[arg(long)]
    transfer_limit: Option<usize>,
    /// Gameweeks to look ahead in ordinary gameweeks
    #[arg(long)]
    lookahead: Option<u32>,
    /// Weight predictions `k` gameweeks ahead by `rate^k` instead of averaging
    #[arg(long)]
    decay_rate: Option<f64>,
}

impl ConfigArg {
    pub(crate) fn load(&self) -> anyhow::Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file("config", path)?,
            None => SimulationConfig::default(),
        };
        if let Some(budget) = self.starting_budget {
            config.starting_budget = budget;
        }
        if let Some(penalty) = self.transfer_penalty {
            config.transfer_penalty = penalty;
        }
        if let Some(limit) = self.transfer_limit {
            config.transfer_limit = limit;
        }
        if let Some(lookahead) = self.lookahead {
            config.lookahead.default = lookahead;
        }
        if let Some(rate) = self.decay_rate {
            config.aggregation = Aggregation::Decayed { rate };
        }
        Ok(config)
    }
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ChipArg {
    /// Chip schedule JSON; the flags below add to it
    #[arg(long)]
    chips: Option<PathBuf>,
    #[arg(long, value_delimiter = ',')]
    wildcard: Vec<u32>,
    #[arg(long, value_delimiter = ',')]
    free_hit: Vec<u32>,
    #[arg(long, value_delimiter = ',')]
    triple_captain: Vec<u32>,
    #[arg(long, value_delimiter = ',')]
    bench_boost: Vec<u32>,
}

impl ChipArg {
    pub(crate) fn load(&self) -> anyhow::Result<ChipSchedule> {
        let mut schedule: ChipSchedule = match &self.chips {
            Some(path) => util::read_json_file("chip schedule", path)?,
            None => ChipSchedule::default(),
        };
        schedule.wildcard.extend(&self.wildcard);
        schedule.free_hit.extend(&self.free_hit);
        schedule.triple_captain.extend(&self.triple_captain);
        schedule.bench_boost.extend(&self.bench_boost);
        Ok(schedule)
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Season dataset JSON
    #[arg(long)]
    dataset: PathBuf,
    /// Last gameweek to simulate (defaults to the last one in the dataset)
    #[arg(long)]
    last_event: Option<u32>,
    #[clap(flatten)]
    config: ConfigArg,
    #[clap(flatten)]
    chips: ChipArg,
    #[clap(flatten)]
    solver: SolverArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    simulated_at: DateTime<Utc>,
    config: SimulationConfig,
    schedule: ChipSchedule,
    summary: SeasonSummary,
    result: SeasonResult,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        dataset,
        last_event,
        config,
        chips,
        solver,
        output,
    } = arg;
    let (dataset, dataset_last_event) = util::read_dataset_file(dataset)?;
    let config = config.load()?;
    let schedule = chips.load()?;
    let last_event = last_event.unwrap_or(dataset_last_event);
    let solver = solver.build();

    let result = simulate_season(
        &dataset.season,
        Providers::from(&dataset),
        &*solver,
        &config,
        &schedule,
        last_event,
    )?;
    let summary = result.summary();
    print_summary(&summary);

    let report = SimulationReport {
        simulated_at: Utc::now(),
        config,
        schedule,
        summary,
        result,
    };
    Output::save_json(&report, output.clone())?;
    Ok(())
}

pub(crate) fn print_summary(summary: &SeasonSummary) {
    eprintln!("Season summary:");
    eprintln!("  Gameweeks:  {}", summary.gameweeks);
    eprintln!("  Total:      {}", summary.total_points);
    eprintln!("  Mean:       {:.2}", summary.mean_points);
    if let Some(best) = summary.best {
        eprintln!("  Best:       {} (gameweek {})", best.points, best.event);
    }
    if let Some(worst) = summary.worst {
        eprintln!("  Worst:      {} (gameweek {})", worst.points, worst.event);
    }
    eprintln!("  Transfers:  {}", summary.transfers_made);
}
