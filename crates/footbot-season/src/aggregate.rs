//! Folding multi-gameweek predictions into a single score per player.
//!
//! Predictions made at gameweek `t` cover `t` and the gameweeks after it. Looking ahead
//! `n` gameweeks means scoring every player over the window `[t, t + n]`:
//!
//! - [`Aggregation::Mean`] - sum of the player's predictions in the window divided by
//!   the window length, so gameweeks without a prediction count as zero
//! - [`Aggregation::Decayed`] - the same sum with gameweek `t + k` weighted by `rate^k`,
//!   divided by the sum of the weights
//!
//! Rows outside the window are ignored, and several rows for the same player and
//! gameweek add up.

use std::collections::HashMap;

use footbot_engine::ElementId;
use serde::{Deserialize, Serialize};

/// One predicted score for one player in one gameweek.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Gameweek the prediction is for.
    pub event: u32,
    pub element: ElementId,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Aggregation {
    #[default]
    Mean,
    Decayed {
        rate: f64,
    },
}

impl Aggregation {
    fn weight(self, offset: u32) -> f64 {
        match self {
            Self::Mean => 1.0,
            Self::Decayed { rate } => rate.powf(f64::from(offset)),
        }
    }
}

/// Score per player over `[start, end]`.
///
/// Players without a prediction in the window are absent from the result; callers
/// treat them as scoring zero.
#[must_use]
pub fn aggregate_predictions(
    predictions: &[Prediction],
    start: u32,
    end: u32,
    aggregation: Aggregation,
) -> HashMap<ElementId, f64> {
    let total_weight = (start..=end)
        .map(|event| aggregation.weight(event - start))
        .sum::<f64>();
    if total_weight <= 0.0 {
        return HashMap::new();
    }

    let mut scores = HashMap::<ElementId, f64>::new();
    for p in predictions.iter().filter(|p| (start..=end).contains(&p.event)) {
        *scores.entry(p.element).or_default() += aggregation.weight(p.event - start) * p.score;
    }
    for score in scores.values_mut() {
        *score /= total_weight;
    }
    scores
}
