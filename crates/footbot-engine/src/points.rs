//! Gameweek scoring.
//!
//! Realized points are the first team's actual points, plus the captain's points once
//! more (twice more under a triple-captain chip), plus the bench under a bench-boost
//! chip, minus a hit for every transfer beyond the free allowance and a grace margin.

use serde::{Deserialize, Serialize};

use crate::{player::Player, squad::Captaincy};

/// Transfer-hit parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// Points deducted per paid transfer.
    pub transfer_hit_cost: i32,
    /// Transfers beyond the free allowance that are still not charged.
    ///
    /// Set to `0` to charge every transfer over the free allowance.
    pub hit_grace: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            transfer_hit_cost: 4,
            hit_grace: 1,
        }
    }
}

impl ScoringRules {
    /// Points deducted for making `made` transfers with `free` available.
    #[must_use]
    pub fn transfer_cost(&self, made: u32, free: u32) -> i32 {
        let paid = made.saturating_sub(free).saturating_sub(self.hit_grace);
        i32::try_from(paid).map_or(i32::MAX, |paid| paid.saturating_mul(self.transfer_hit_cost))
    }
}

/// Chip effects on scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringModifiers {
    /// Multiplier applied to the captain's points (2 normally, 3 under triple captain).
    pub captain_multiplier: i32,
    /// Whether bench points count.
    pub bench_boost: bool,
}

impl Default for ScoringModifiers {
    fn default() -> Self {
        Self {
            captain_multiplier: 2,
            bench_boost: false,
        }
    }
}

/// Transfers made this gameweek against the free allowance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferCount {
    pub made: u32,
    pub free: u32,
}

/// Realized points for one gameweek, by source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsBreakdown {
    /// First-team points, captain excluded.
    pub first_team: i32,
    /// Captain points after the multiplier.
    pub captain: i32,
    /// Bench points (non-zero only under bench boost).
    pub bench: i32,
    pub transfer_cost: i32,
    pub total: i32,
}

/// Scores a resolved gameweek.
///
/// `first_team` and `captaincy` should be the post-substitution, post-failover values.
#[must_use]
pub fn gameweek_points(
    first_team: &[Player],
    bench: &[Player],
    captaincy: &Captaincy,
    transfers: TransferCount,
    modifiers: ScoringModifiers,
    rules: &ScoringRules,
) -> PointsBreakdown {
    let (captains, others): (Vec<_>, Vec<_>) = first_team
        .iter()
        .partition(|p| captaincy.captain == Some(p.element));
    let first_team = others.iter().map(|p| p.actual_score()).sum::<i32>();
    let captain = captains
        .iter()
        .map(|p| p.actual_score() * modifiers.captain_multiplier)
        .sum::<i32>();
    let bench = if modifiers.bench_boost {
        bench.iter().map(Player::actual_score).sum()
    } else {
        0
    };
    let transfer_cost = rules.transfer_cost(transfers.made, transfers.free);
    PointsBreakdown {
        first_team,
        captain,
        bench,
        transfer_cost,
        total: first_team + captain + bench - transfer_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{ClubId, ElementId, MatchResult, Position};

    fn players(range: std::ops::RangeInclusive<u32>) -> Vec<Player> {
        range
            .map(|e| {
                let mut p = Player::new(ElementId(e), Position::Midfielder, ClubId(1), 50);
                p.result = Some(MatchResult {
                    minutes: 90,
                    points: 1,
                });
                p
            })
            .collect()
    }

    fn score(
        transfers: TransferCount,
        modifiers: ScoringModifiers,
        rules: &ScoringRules,
    ) -> PointsBreakdown {
        gameweek_points(
            &players(1..=11),
            &players(12..=15),
            &Captaincy::new(ElementId(11), ElementId(10)),
            transfers,
            modifiers,
            rules,
        )
    }

    #[test]
    fn test_plain_gameweek() {
        let breakdown = score(
            TransferCount { made: 1, free: 1 },
            ScoringModifiers::default(),
            &ScoringRules::default(),
        );
        assert_eq!(
            breakdown,
            PointsBreakdown {
                first_team: 10,
                captain: 2,
                bench: 0,
                transfer_cost: 0,
                total: 12,
            }
        );
    }

    #[test]
    fn test_transfer_hits_with_grace() {
        let rules = ScoringRules::default();
        let total = |made| score(TransferCount { made, free: 1 }, ScoringModifiers::default(), &rules).total;
        assert_eq!(total(2), 12);
        assert_eq!(total(3), 8);
        assert_eq!(total(4), 4);
    }

    #[test]
    fn test_transfer_hits_without_grace() {
        let rules = ScoringRules {
            hit_grace: 0,
            ..ScoringRules::default()
        };
        let total = |made| score(TransferCount { made, free: 1 }, ScoringModifiers::default(), &rules).total;
        assert_eq!(total(0), 12);
        assert_eq!(total(2), 8);
        assert_eq!(total(3), 4);
    }

    #[test]
    fn test_chip_modifiers() {
        let rules = ScoringRules::default();
        let transfers = TransferCount { made: 0, free: 1 };
        let triple = ScoringModifiers {
            captain_multiplier: 3,
            bench_boost: false,
        };
        assert_eq!(score(transfers, triple, &rules).total, 13);

        let boost = ScoringModifiers {
            bench_boost: true,
            ..ScoringModifiers::default()
        };
        let breakdown = score(transfers, boost, &rules);
        assert_eq!(breakdown.bench, 4);
        assert_eq!(breakdown.total, 16);
    }

    #[test]
    fn test_no_captain() {
        let breakdown = gameweek_points(
            &players(1..=11),
            &players(12..=15),
            &Captaincy::none(),
            TransferCount::default(),
            ScoringModifiers::default(),
            &ScoringRules::default(),
        );
        assert_eq!(breakdown.captain, 0);
        assert_eq!(breakdown.total, 11);
    }
}
