//! Roster rules and gameweek resolution for a fantasy-football squad.
//!
//! Everything here is deterministic and solver-free: the types describing a selection,
//! the rules a selection must obey, and what happens once match results are in
//! (substitutions, captain failover, scoring, price tracking).

pub use self::{captaincy::*, player::*, points::*, squad::*, substitution::*, valuation::*};

pub mod captaincy;
pub mod player;
pub mod points;
pub mod squad;
pub mod substitution;
pub mod valuation;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum EngineError {
    #[display("player {_0} is not in the pool")]
    #[from(ignore)]
    MissingPlayer(#[error(not(source))] ElementId),
    #[display("invalid squad: {_0}")]
    InvalidSquad(SquadError),
}
