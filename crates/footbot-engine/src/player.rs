use serde::{Deserialize, Serialize};

/// Price in tenths of a currency unit (e.g. `55` is 5.5m).
///
/// Signed so that bank balances and price differences never need casts.
pub type Price = i64;

/// Number of clubs in the league.
pub const NUM_CLUBS: u8 = 20;

/// Stable player identifier, the unit of selection for the optimizer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct ElementId(pub u32);

/// Club identifier (`1..=NUM_CLUBS` for real data, but any value is accepted).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct ClubId(pub u8);

/// Playing position.
///
/// Variants are declared in upstream `element_type` order, so sorting by position
/// yields keeper, defenders, midfielders, forwards.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[display("keeper")]
    Keeper,
    #[display("defender")]
    Defender,
    #[display("midfielder")]
    Midfielder,
    #[display("forward")]
    Forward,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Keeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];

    /// Maps the upstream numeric `element_type` (1-4) to a position.
    #[must_use]
    pub const fn from_element_type(element_type: u8) -> Option<Self> {
        match element_type {
            1 => Some(Self::Keeper),
            2 => Some(Self::Defender),
            3 => Some(Self::Midfielder),
            4 => Some(Self::Forward),
            _ => None,
        }
    }

    /// Zero-based index into [`Position::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// What a player did in a resolved gameweek.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub minutes: u32,
    pub points: i32,
}

impl MatchResult {
    #[must_use]
    pub const fn played(&self) -> bool {
        self.minutes > 0
    }
}

/// A player in the selection pool for one gameweek.
///
/// Everything except `price` is fixed for the gameweek. `price` starts as the market
/// price and is replaced by the selling price for owned players before optimization.
/// `predicted_score` is whatever signal the optimizer should maximize; pool providers
/// leave it at zero and the simulator fills it from aggregated predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub element: ElementId,
    pub position: Position,
    pub club: ClubId,
    pub price: Price,
    #[serde(default)]
    pub predicted_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<MatchResult>,
}

impl Player {
    #[must_use]
    pub fn new(element: ElementId, position: Position, club: ClubId, price: Price) -> Self {
        Self {
            element,
            position,
            club,
            price,
            predicted_score: 0.0,
            result: None,
        }
    }

    #[must_use]
    pub fn with_predicted_score(mut self, predicted_score: f64) -> Self {
        self.predicted_score = predicted_score;
        self
    }

    #[must_use]
    pub fn minutes_played(&self) -> u32 {
        self.result.map_or(0, |r| r.minutes)
    }

    #[must_use]
    pub fn actual_score(&self) -> i32 {
        self.result.map_or(0, |r| r.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_order_follows_element_type() {
        let mut positions = vec![
            Position::Forward,
            Position::Keeper,
            Position::Midfielder,
            Position::Defender,
        ];
        positions.sort();
        assert_eq!(positions, Position::ALL);
        for (i, position) in Position::ALL.iter().enumerate() {
            let element_type = u8::try_from(i + 1).unwrap();
            assert_eq!(Position::from_element_type(element_type), Some(*position));
            assert_eq!(position.index(), i);
        }
        assert_eq!(Position::from_element_type(0), None);
        assert_eq!(Position::from_element_type(5), None);
    }

    #[test]
    fn test_player_json_shape() {
        let json = r#"{"element": 7, "position": "defender", "club": 3, "price": 45}"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.element, ElementId(7));
        assert_eq!(player.position, Position::Defender);
        assert_eq!(player.club, ClubId(3));
        assert_eq!(player.price, 45);
        assert!(player.predicted_score.abs() < f64::EPSILON);
        assert_eq!(player.minutes_played(), 0);
        assert_eq!(player.actual_score(), 0);
    }
}
