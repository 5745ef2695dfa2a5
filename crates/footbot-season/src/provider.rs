//! Where a simulation gets its data from.
//!
//! The simulator reads three things per `(season, gameweek)`: the priced player pool,
//! the predictions made at that gameweek, and the results once it has been played.
//! Each is behind its own trait so that they can come from different sources.
//! [`SeasonDataset`] implements all three from memory and is what the CLI loads from
//! JSON.

use std::collections::{BTreeMap, HashMap};

use footbot_engine::{ElementId, MatchResult, Player};
use serde::{Deserialize, Serialize};

use crate::aggregate::Prediction;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ProviderError {
    #[display("no {kind} for season {season} gameweek {event}")]
    NotFound {
        kind: &'static str,
        season: String,
        event: u32,
    },
    #[display("{_0}")]
    Other(#[error(not(source))] String),
}

/// Players available in a gameweek, at market price and without scores.
pub trait PlayerPoolProvider: Send + Sync {
    fn players(&self, season: &str, event: u32) -> Result<Vec<Player>, ProviderError>;
}

/// Predictions made at a gameweek for that gameweek and the ones after it.
pub trait PredictionProvider: Send + Sync {
    fn predictions(&self, season: &str, made_at: u32) -> Result<Vec<Prediction>, ProviderError>;
}

/// Minutes and points per player once a gameweek has been played.
///
/// Players without an entry did not play.
pub trait ResultsProvider: Send + Sync {
    fn results(
        &self,
        season: &str,
        event: u32,
    ) -> Result<HashMap<ElementId, MatchResult>, ProviderError>;
}

/// The three data sources a simulation reads from.
#[derive(Clone, Copy)]
pub struct Providers<'a> {
    pub pool: &'a dyn PlayerPoolProvider,
    pub predictions: &'a dyn PredictionProvider,
    pub results: &'a dyn ResultsProvider,
}

impl<'a, T> From<&'a T> for Providers<'a>
where
    T: PlayerPoolProvider + PredictionProvider + ResultsProvider,
{
    fn from(source: &'a T) -> Self {
        Self {
            pool: source,
            predictions: source,
            results: source,
        }
    }
}

/// Everything the simulator needs about one gameweek.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameweekData {
    pub players: Vec<Player>,
    /// Predictions made at this gameweek.
    pub predictions: Vec<Prediction>,
    pub results: BTreeMap<ElementId, MatchResult>,
}

/// A whole season held in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonDataset {
    pub season: String,
    pub gameweeks: BTreeMap<u32, GameweekData>,
}

impl SeasonDataset {
    #[must_use]
    pub fn new(season: impl Into<String>) -> Self {
        Self {
            season: season.into(),
            gameweeks: BTreeMap::new(),
        }
    }

    /// Last gameweek present, if any.
    #[must_use]
    pub fn last_event(&self) -> Option<u32> {
        self.gameweeks.keys().next_back().copied()
    }

    fn gameweek(
        &self,
        kind: &'static str,
        season: &str,
        event: u32,
    ) -> Result<&GameweekData, ProviderError> {
        self.gameweeks
            .get(&event)
            .filter(|_| season == self.season)
            .ok_or_else(|| ProviderError::NotFound {
                kind,
                season: season.to_owned(),
                event,
            })
    }
}

impl PlayerPoolProvider for SeasonDataset {
    fn players(&self, season: &str, event: u32) -> Result<Vec<Player>, ProviderError> {
        let gameweek = self.gameweek("player pool", season, event)?;
        Ok(gameweek
            .players
            .iter()
            .map(|p| Player {
                predicted_score: 0.0,
                result: None,
                ..p.clone()
            })
            .collect())
    }
}

impl PredictionProvider for SeasonDataset {
    fn predictions(&self, season: &str, made_at: u32) -> Result<Vec<Prediction>, ProviderError> {
        Ok(self
            .gameweek("predictions", season, made_at)?
            .predictions
            .clone())
    }
}

impl ResultsProvider for SeasonDataset {
    fn results(
        &self,
        season: &str,
        event: u32,
    ) -> Result<HashMap<ElementId, MatchResult>, ProviderError> {
        let gameweek = self.gameweek("results", season, event)?;
        Ok(gameweek.results.iter().map(|(&e, &r)| (e, r)).collect())
    }
}

#[cfg(test)]
mod tests {
    use footbot_engine::{ClubId, Position};

    use super::*;

    fn dataset() -> SeasonDataset {
        let mut dataset = SeasonDataset::new("2425");
        let mut player = Player::new(ElementId(1), Position::Forward, ClubId(2), 75);
        player.predicted_score = 9.0;
        dataset.gameweeks.insert(
            1,
            GameweekData {
                players: vec![player],
                predictions: vec![Prediction {
                    event: 1,
                    element: ElementId(1),
                    score: 5.5,
                }],
                results: [(
                    ElementId(1),
                    MatchResult {
                        minutes: 90,
                        points: 8,
                    },
                )]
                .into(),
            },
        );
        dataset
    }

    #[test]
    fn test_pool_is_unscored() {
        let dataset = dataset();
        let players = dataset.players("2425", 1).unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].price, 75);
        assert!(players[0].predicted_score.abs() < f64::EPSILON);
        assert_eq!(players[0].result, None);
    }

    #[test]
    fn test_lookups() {
        let dataset = dataset();
        assert_eq!(dataset.predictions("2425", 1).unwrap().len(), 1);
        assert_eq!(
            dataset.results("2425", 1).unwrap()[&ElementId(1)].points,
            8
        );
        assert_eq!(dataset.last_event(), Some(1));
        assert!(matches!(
            dataset.players("2425", 2),
            Err(ProviderError::NotFound { event: 2, .. })
        ));
        assert!(matches!(
            dataset.results("1920", 1),
            Err(ProviderError::NotFound { .. })
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_results_map() {
        let dataset = dataset();
        let json = serde_json::to_string(&dataset).unwrap();
        assert!(json.contains(r#""results":{"1":{"minutes":90,"points":8}}"#));
        let back: SeasonDataset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dataset);
    }

    #[test]
    fn test_providers_from_dataset() {
        let dataset = dataset();
        let providers = Providers::from(&dataset);
        assert_eq!(providers.pool.players("2425", 1).unwrap().len(), 1);
    }
}
