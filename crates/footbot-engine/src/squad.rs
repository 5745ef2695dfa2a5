//! Squad, lineup and captaincy types together with the roster rules they obey.
//!
//! - [`Squad`] - 15 distinct elements owned for one gameweek
//! - [`Lineup`] - a squad split into an 11-player first team and an ordered 4-player bench
//! - [`Captaincy`] - captain and vice (either may be vacated after failover)
//! - [`Pick`] - one of the 15 numbered squad slots, as submitted upstream
//!
//! The rule constants are the ones the optimizer encodes as linear constraints; the
//! `validate` methods check the same rules on concrete selections.

use std::collections::{BTreeSet, HashMap};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::{
    EngineError,
    player::{ClubId, ElementId, Player, Position},
};

pub const SQUAD_SIZE: usize = 15;
pub const FIRST_TEAM_SIZE: usize = 11;
pub const BENCH_SIZE: usize = 4;
pub const MAX_PLAYERS_PER_CLUB: usize = 3;

/// Squad count per position, indexed by [`Position::index`].
const SQUAD_QUOTA: [usize; 4] = [2, 5, 5, 3];

/// Inclusive first-team count bounds per position, indexed by [`Position::index`].
const FIRST_TEAM_BOUNDS: [(usize, usize); 4] = [(1, 1), (3, 5), (2, 5), (1, 3)];

/// Number of players of `position` a squad must contain.
#[must_use]
pub const fn squad_quota(position: Position) -> usize {
    SQUAD_QUOTA[position.index()]
}

/// Inclusive `(min, max)` number of players of `position` in a first team.
#[must_use]
pub const fn first_team_bounds(position: Position) -> (usize, usize) {
    FIRST_TEAM_BOUNDS[position.index()]
}

/// Reasons a selection breaks the roster rules.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SquadError {
    #[display("expected {expected} players, got {actual}")]
    WrongSize { expected: usize, actual: usize },
    #[display("player {_0} selected more than once")]
    Duplicate(#[error(not(source))] ElementId),
    #[display("expected {expected} {position}s in squad, got {actual}")]
    PositionQuota {
        position: Position,
        expected: usize,
        actual: usize,
    },
    #[display("{count} players from club {club}, at most 3 allowed")]
    ClubCap { club: ClubId, count: usize },
    #[display("{count} {position}s in first team is outside {min}..={max}")]
    Formation {
        position: Position,
        count: usize,
        min: usize,
        max: usize,
    },
}

fn lookup<'a>(
    players: &HashMap<ElementId, &'a Player>,
    element: ElementId,
) -> Result<&'a Player, EngineError> {
    players
        .get(&element)
        .copied()
        .ok_or(EngineError::MissingPlayer(element))
}

fn index_players(players: &[Player]) -> HashMap<ElementId, &Player> {
    players.iter().map(|p| (p.element, p)).collect()
}

/// Exactly [`SQUAD_SIZE`] distinct elements.
///
/// Construction only checks cardinality and distinctness; position quotas and the
/// club cap need player data and are checked by [`Squad::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ElementId>", into = "Vec<ElementId>")]
pub struct Squad(ArrayVec<ElementId, SQUAD_SIZE>);

impl Squad {
    pub fn new<I>(elements: I) -> Result<Self, SquadError>
    where
        I: IntoIterator<Item = ElementId>,
    {
        let elements = elements.into_iter().collect::<Vec<_>>();
        if elements.len() != SQUAD_SIZE {
            return Err(SquadError::WrongSize {
                expected: SQUAD_SIZE,
                actual: elements.len(),
            });
        }
        let mut seen = BTreeSet::new();
        for &element in &elements {
            if !seen.insert(element) {
                return Err(SquadError::Duplicate(element));
            }
        }
        Ok(Self(elements.into_iter().collect()))
    }

    #[must_use]
    pub fn elements(&self) -> &[ElementId] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn contains(&self, element: ElementId) -> bool {
        self.0.contains(&element)
    }

    /// Number of elements shared with `other`.
    #[must_use]
    pub fn overlap(&self, other: &Squad) -> usize {
        self.iter().filter(|&e| other.contains(e)).count()
    }

    /// Checks position quotas and the per-club cap against `players`.
    pub fn validate(&self, players: &[Player]) -> Result<(), EngineError> {
        let index = index_players(players);
        let mut position_counts = [0; 4];
        let mut club_counts: HashMap<ClubId, usize> = HashMap::new();
        for element in self.iter() {
            let player = lookup(&index, element)?;
            position_counts[player.position.index()] += 1;
            *club_counts.entry(player.club).or_default() += 1;
        }
        for position in Position::ALL {
            let actual = position_counts[position.index()];
            let expected = squad_quota(position);
            if actual != expected {
                return Err(SquadError::PositionQuota {
                    position,
                    expected,
                    actual,
                }
                .into());
            }
        }
        if let Some((&club, &count)) = club_counts
            .iter()
            .find(|&(_, &count)| count > MAX_PLAYERS_PER_CLUB)
        {
            return Err(SquadError::ClubCap { club, count }.into());
        }
        Ok(())
    }
}

impl TryFrom<Vec<ElementId>> for Squad {
    type Error = SquadError;

    fn try_from(value: Vec<ElementId>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Squad> for Vec<ElementId> {
    fn from(value: Squad) -> Self {
        value.0.into_iter().collect()
    }
}

/// Captain and vice-captain.
///
/// Freshly selected lineups always carry both; [`crate::resolve_captaincy`] may vacate
/// either after results are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Captaincy {
    pub captain: Option<ElementId>,
    pub vice: Option<ElementId>,
}

impl Captaincy {
    #[must_use]
    pub const fn new(captain: ElementId, vice: ElementId) -> Self {
        Self {
            captain: Some(captain),
            vice: Some(vice),
        }
    }

    #[must_use]
    pub const fn none() -> Self {
        Self {
            captain: None,
            vice: None,
        }
    }
}

/// One numbered squad slot (`1..=15`): first team first, then bench.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pick {
    pub element: ElementId,
    pub slot: usize,
    pub is_captain: bool,
    pub is_vice_captain: bool,
}

/// A squad partitioned into first team and bench.
///
/// Bench order is substitution priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    first_team: ArrayVec<ElementId, FIRST_TEAM_SIZE>,
    bench: ArrayVec<ElementId, BENCH_SIZE>,
}

impl Lineup {
    pub fn new<F, B>(first_team: F, bench: B) -> Result<Self, SquadError>
    where
        F: IntoIterator<Item = ElementId>,
        B: IntoIterator<Item = ElementId>,
    {
        let first_team = first_team.into_iter().collect::<Vec<_>>();
        let bench = bench.into_iter().collect::<Vec<_>>();
        if first_team.len() != FIRST_TEAM_SIZE {
            return Err(SquadError::WrongSize {
                expected: FIRST_TEAM_SIZE,
                actual: first_team.len(),
            });
        }
        if bench.len() != BENCH_SIZE {
            return Err(SquadError::WrongSize {
                expected: BENCH_SIZE,
                actual: bench.len(),
            });
        }
        // distinctness across both halves
        Squad::new(first_team.iter().chain(&bench).copied())?;
        Ok(Self {
            first_team: first_team.into_iter().collect(),
            bench: bench.into_iter().collect(),
        })
    }

    #[must_use]
    pub fn first_team(&self) -> &[ElementId] {
        &self.first_team
    }

    #[must_use]
    pub fn bench(&self) -> &[ElementId] {
        &self.bench
    }

    #[must_use]
    pub fn squad(&self) -> Squad {
        Squad(self.first_team.iter().chain(&self.bench).copied().collect())
    }

    /// Checks squad rules plus first-team formation bounds.
    pub fn validate(&self, players: &[Player]) -> Result<(), EngineError> {
        self.squad().validate(players)?;
        let index = index_players(players);
        let mut counts = [0; 4];
        for &element in &self.first_team {
            counts[lookup(&index, element)?.position.index()] += 1;
        }
        for position in Position::ALL {
            let (min, max) = first_team_bounds(position);
            let count = counts[position.index()];
            if !(min..=max).contains(&count) {
                return Err(SquadError::Formation {
                    position,
                    count,
                    min,
                    max,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Numbered picks: first team by position then element, then the bench in
    /// substitution order.
    pub fn picks(
        &self,
        captaincy: &Captaincy,
        players: &[Player],
    ) -> Result<Vec<Pick>, EngineError> {
        let index = index_players(players);
        let mut first_team = self
            .first_team
            .iter()
            .map(|&e| Ok((lookup(&index, e)?.position, e)))
            .collect::<Result<Vec<_>, EngineError>>()?;
        first_team.sort_unstable();
        for &e in &self.bench {
            lookup(&index, e)?;
        }
        let ordered = first_team
            .into_iter()
            .map(|(_, e)| e)
            .chain(self.bench.iter().copied());
        Ok(ordered
            .enumerate()
            .map(|(i, element)| Pick {
                element,
                slot: i + 1,
                is_captain: captaincy.captain == Some(element),
                is_vice_captain: captaincy.vice == Some(element),
            })
            .collect())
    }
}
