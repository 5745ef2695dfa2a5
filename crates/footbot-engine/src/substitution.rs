//! Automatic substitutions after a gameweek resolves.
//!
//! Starters with zero minutes are "missing". Bench players who played are tried in bench
//! order; each one replaces the first missing starter whose removal still leaves a
//! valid formation (exactly one keeper, at least three defenders, at least one forward).
//!
//! This is a single greedy pass, not a search for the best-scoring valid lineup: a bench
//! player that fits an earlier missing slot takes it even when a later slot would have
//! scored more, and alternative orders are never explored. Callers rely on the exact
//! resulting order, so the heuristic is kept as is.

use serde::{Deserialize, Serialize};

use crate::player::{ElementId, Player, Position};

/// Most substitutions a single gameweek allows.
pub const MAX_SUBSTITUTIONS: usize = 3;

/// A starter replaced by a bench player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub out: ElementId,
    pub on: ElementId,
}

/// Lineup after substitutions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutedLineup {
    pub first_team: Vec<Player>,
    /// Replaced starters (in their original order) followed by unused bench players.
    pub bench: Vec<Player>,
    pub substitutions: Vec<Substitution>,
}

/// Whether `first_team` may take the field: one keeper, three or more defenders and
/// at least one forward.
#[must_use]
pub fn is_valid_formation<'a, I>(first_team: I) -> bool
where
    I: IntoIterator<Item = &'a Player>,
{
    let mut counts = [0_usize; 4];
    for player in first_team {
        counts[player.position.index()] += 1;
    }
    counts[Position::Keeper.index()] == 1
        && counts[Position::Defender.index()] >= 3
        && counts[Position::Forward.index()] >= 1
}

/// Repairs `first_team` using `bench`, given each player's minutes.
///
/// Bench players are tried in bench order, every slot including the last one, and each
/// goes on for the first missing starter whose removal keeps the formation valid. At most
/// [`MAX_SUBSTITUTIONS`] are made. Substitutes are appended to the end of the first team.
#[must_use]
pub fn apply_substitutions(first_team: &[Player], bench: &[Player]) -> SubstitutedLineup {
    let mut lineup = first_team.to_vec();
    let mut missing = first_team
        .iter()
        .filter(|p| p.minutes_played() == 0)
        .map(|p| p.element)
        .collect::<Vec<_>>();
    let available = bench.iter().filter(|p| p.minutes_played() > 0).count();
    let limit = MAX_SUBSTITUTIONS.min(missing.len()).min(available);

    let mut substitutions = vec![];
    for candidate in bench.iter().filter(|p| p.minutes_played() > 0) {
        if substitutions.len() >= limit {
            break;
        }
        let slot = missing.iter().position(|&out| {
            let trial = lineup
                .iter()
                .filter(|p| p.element != out)
                .chain([candidate]);
            is_valid_formation(trial)
        });
        if let Some(slot) = slot {
            let out = missing.remove(slot);
            lineup.retain(|p| p.element != out);
            lineup.push(candidate.clone());
            substitutions.push(Substitution {
                out,
                on: candidate.element,
            });
        }
    }

    let in_lineup = |player: &&Player| lineup.iter().any(|p| p.element == player.element);
    let remaining_bench = first_team
        .iter()
        .chain(bench)
        .filter(|p| !in_lineup(p))
        .cloned()
        .collect();

    SubstitutedLineup {
        first_team: lineup,
        bench: remaining_bench,
        substitutions,
    }
}
