//! Season simulation for the squad optimizer.
//!
//! A season is replayed gameweek by gameweek. Each gameweek the [`advance`] state machine
//! turns the carried-over [`SeasonState`] and the [`ChipSchedule`] into a budget, transfer
//! limits and a lookahead window, the optimizer picks a squad and lineup on aggregated
//! predictions, and the realized results are scored after automatic substitutions and
//! captain failover.
//!
//! Data comes in through the [`PlayerPoolProvider`], [`PredictionProvider`] and
//! [`ResultsProvider`] traits. [`SeasonDataset`] implements all three in memory.
//!
//! ```no_run
//! use footbot_optimizer::MicroLpSolver;
//! use footbot_season::{ChipSchedule, Providers, SeasonDataset, SimulationConfig, simulate_season};
//!
//! # fn load() -> SeasonDataset { SeasonDataset::new("2425") }
//! let dataset = load();
//! let result = simulate_season(
//!     &dataset.season,
//!     Providers::from(&dataset),
//!     &MicroLpSolver,
//!     &SimulationConfig::default(),
//!     &ChipSchedule::default(),
//!     38,
//! )?;
//! println!("{} points", result.total_points());
//! # Ok::<(), footbot_season::SimulationError>(())
//! ```

use footbot_engine::EngineError;
use footbot_optimizer::SelectionError;

pub use self::{
    aggregate::*, chip::*, config::*, provider::*, simulator::*, state::*, sweep::*,
    transfer::*,
};

mod aggregate;
mod chip;
mod config;
mod provider;
mod simulator;
mod state;
mod sweep;
#[cfg(test)]
mod testing;
mod transfer;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SimulationError {
    #[display("invalid argument: {_0}")]
    #[from(ignore)]
    InvalidArgument(#[error(not(source))] String),
    #[display("{_0}")]
    Engine(EngineError),
    #[display("gameweek {event}: {source}")]
    #[from(ignore)]
    Selection { event: u32, source: SelectionError },
    #[display("{_0}")]
    Provider(ProviderError),
}
