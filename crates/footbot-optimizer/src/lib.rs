//! Squad selection for one gameweek.
//!
//! [`select_squad`] turns a priced, scored player pool into a legal 15-player squad, a
//! first team and bench, a captain and vice-captain, and the transfers needed to reach
//! that squad from the current one.
//!
//! # Layers
//!
//! - [`program`] - a solver-agnostic 0/1 linear program (variables, constraints, objective)
//! - [`solver`] - the [`Solver`] trait and the default `microlp` backend
//! - [`selection`] - the squad-selection model built on top of both
//!
//! The selection model never talks to a backend directly, so swapping the MILP solver
//! only means passing a different [`Solver`].
//!
//! # Example
//!
//! ```no_run
//! use footbot_engine::Player;
//! use footbot_optimizer::{MicroLpSolver, SelectionParams, select_squad};
//!
//! # let players: Vec<Player> = vec![];
//! let selection = select_squad(&players, &SelectionParams::from_scratch(1000), &MicroLpSolver)?;
//! println!("captain: {:?}", selection.captaincy.captain);
//! # Ok::<(), footbot_optimizer::SelectionError>(())
//! ```

pub use self::{selection::*, solver::*};

pub mod program;
pub mod selection;
pub mod solver;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SelectionError {
    #[display("invalid argument: {_0}")]
    InvalidArgument(#[error(not(source))] String),
    #[display("no squad satisfies the budget, club and position constraints")]
    Infeasible,
    #[display("{_0}")]
    Solver(SolveError),
}

impl From<SolveError> for SelectionError {
    fn from(value: SolveError) -> Self {
        match value {
            SolveError::Infeasible => Self::Infeasible,
            other => Self::Solver(other),
        }
    }
}
