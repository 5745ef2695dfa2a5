//! One-shot season chips and when they are played.

use std::collections::BTreeSet;

use footbot_engine::ScoringModifiers;
use serde::{Deserialize, Serialize};

use crate::SimulationError;

/// The chip in play for a single gameweek, if any.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum ActiveChip {
    #[default]
    #[display("none")]
    None,
    /// Unlimited free transfers; the new squad is kept.
    #[display("wildcard")]
    Wildcard,
    /// Unlimited free transfers for one gameweek; the previous squad returns afterwards.
    #[display("free hit")]
    FreeHit,
    /// The captain scores three times instead of twice.
    #[display("triple captain")]
    TripleCaptain,
    /// Bench points count.
    #[display("bench boost")]
    BenchBoost,
}

impl ActiveChip {
    /// Whether the chip lifts the transfer limit and penalty.
    #[must_use]
    pub const fn relaxes_transfers(self) -> bool {
        matches!(self, Self::Wildcard | Self::FreeHit)
    }

    #[must_use]
    pub fn scoring_modifiers(self) -> ScoringModifiers {
        match self {
            Self::TripleCaptain => ScoringModifiers {
                captain_multiplier: 3,
                ..ScoringModifiers::default()
            },
            Self::BenchBoost => ScoringModifiers {
                bench_boost: true,
                ..ScoringModifiers::default()
            },
            Self::None | Self::Wildcard | Self::FreeHit => ScoringModifiers::default(),
        }
    }
}

/// Gameweeks on which each chip is played.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChipSchedule {
    pub wildcard: BTreeSet<u32>,
    pub free_hit: BTreeSet<u32>,
    pub triple_captain: BTreeSet<u32>,
    pub bench_boost: BTreeSet<u32>,
}

impl ChipSchedule {
    fn entries(&self) -> impl Iterator<Item = (ActiveChip, u32)> + '_ {
        [
            (ActiveChip::Wildcard, &self.wildcard),
            (ActiveChip::FreeHit, &self.free_hit),
            (ActiveChip::TripleCaptain, &self.triple_captain),
            (ActiveChip::BenchBoost, &self.bench_boost),
        ]
        .into_iter()
        .flat_map(|(chip, events)| events.iter().map(move |&event| (chip, event)))
    }

    /// Rejects schedules the simulator cannot play.
    ///
    /// Gameweeks are numbered from 1, at most one chip may be played per gameweek, and
    /// the transfer chips are meaningless in gameweek 1 where the squad is built from
    /// scratch anyway.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let mut seen = BTreeSet::new();
        for (chip, event) in self.entries() {
            if event == 0 {
                return Err(SimulationError::InvalidArgument(format!(
                    "{chip} scheduled for gameweek 0, gameweeks start at 1"
                )));
            }
            if event == 1 && chip.relaxes_transfers() {
                return Err(SimulationError::InvalidArgument(format!(
                    "{chip} cannot be played in gameweek 1"
                )));
            }
            if !seen.insert(event) {
                return Err(SimulationError::InvalidArgument(format!(
                    "more than one chip scheduled for gameweek {event}"
                )));
            }
        }
        Ok(())
    }

    /// The chip played in `event`. Assumes a validated schedule.
    #[must_use]
    pub fn active(&self, event: u32) -> ActiveChip {
        self.entries()
            .find(|&(_, e)| e == event)
            .map_or(ActiveChip::None, |(chip, _)| chip)
    }
}
