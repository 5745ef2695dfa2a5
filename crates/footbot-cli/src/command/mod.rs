use clap::{Parser, Subcommand};
use env_logger::Env;

use self::{
    generate_dataset::GenerateDatasetArg, select::SelectArg, simulate::SimulateArg,
    sweep::SweepArg,
};

mod generate_dataset;
mod select;
mod simulate;
mod sweep;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log debug output (overridden by `RUST_LOG`)
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Select a squad and lineup for a single gameweek
    Select(#[clap(flatten)] SelectArg),
    /// Replay a season from a dataset
    Simulate(#[clap(flatten)] SimulateArg),
    /// Replay a season once per scenario, in parallel
    Sweep(#[clap(flatten)] SweepArg),
    /// Generate a synthetic season dataset
    GenerateDataset(#[clap(flatten)] GenerateDatasetArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    match &args.mode {
        Mode::Select(arg) => select::run(arg)?,
        Mode::Simulate(arg) => simulate::run(arg)?,
        Mode::Sweep(arg) => sweep::run(arg)?,
        Mode::GenerateDataset(arg) => generate_dataset::run(arg)?,
    }
    Ok(())
}
