use footbot_engine::{Price, SQUAD_SIZE, ScoringRules};
use footbot_optimizer::ScoringWeights;
use serde::{Deserialize, Serialize};

use crate::{SimulationError, aggregate::Aggregation};

/// How many gameweeks beyond the current one the squad decision looks at.
///
/// A free-hit squad is only used once, so it always looks at its own gameweek alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lookahead {
    /// Ordinary gameweeks.
    pub default: u32,
    /// Gameweek 1, when the squad is built from nothing.
    pub from_scratch: u32,
    /// Wildcard gameweeks.
    pub wildcard: u32,
}

/// Every knob of a season simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub starting_budget: Price,
    pub weights: ScoringWeights,
    /// Objective cost per transfer, seen by the optimizer.
    pub transfer_penalty: f64,
    /// Most transfers per ordinary gameweek.
    pub transfer_limit: usize,
    pub lookahead: Lookahead,
    pub aggregation: Aggregation,
    /// Points deducted for transfers after the gameweek is played.
    pub scoring: ScoringRules,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            starting_budget: 1000,
            weights: ScoringWeights::default(),
            transfer_penalty: 4.0,
            transfer_limit: 1,
            lookahead: Lookahead::default(),
            aggregation: Aggregation::default(),
            scoring: ScoringRules::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        let invalid = |message: String| Err(SimulationError::InvalidArgument(message));
        if let Err(e) = self.weights.validate() {
            return invalid(e.to_string());
        }
        if self.starting_budget <= 0 {
            return invalid(format!(
                "starting budget must be positive, got {}",
                self.starting_budget
            ));
        }
        if !self.transfer_penalty.is_finite() || self.transfer_penalty < 0.0 {
            return invalid(format!(
                "transfer penalty must be non-negative, got {}",
                self.transfer_penalty
            ));
        }
        if self.transfer_limit > SQUAD_SIZE {
            return invalid(format!(
                "transfer limit must be within 0..={SQUAD_SIZE}, got {}",
                self.transfer_limit
            ));
        }
        match self.aggregation {
            Aggregation::Decayed { rate } if !(rate.is_finite() && rate > 0.0) => {
                invalid(format!("decay rate must be positive, got {rate}"))
            }
            _ => Ok(()),
        }
    }
}
