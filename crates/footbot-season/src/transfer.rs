//! The transfer and chip state machine.
//!
//! [`advance`] decides what the optimizer may do in a gameweek, given the season state
//! carried in from the previous one:
//!
//! | gameweek | budget            | free transfers               | penalty, limit | lookahead    |
//! |----------|-------------------|------------------------------|----------------|--------------|
//! | 1        | starting budget   | 15                           | none           | from scratch |
//! | ordinary | team value + bank | 2 after a quiet week, else 1 | configured     | default      |
//! | wildcard | team value + bank | 15                           | none           | wildcard     |
//! | free hit | team value + bank | 15                           | none           | 0            |
//!
//! Team value uses selling prices. A free hit snapshots squad, bank and purchase prices,
//! and the gameweek after it starts from that snapshot again. Triple captain and bench
//! boost only change scoring and do not show up here.
//!
//! Once the optimizer has chosen, [`SeasonState::record_selection`] books the new squad.

use footbot_engine::{EngineError, Price, PriceTable, SQUAD_SIZE, Squad, team_value};
use serde::{Deserialize, Serialize};

use crate::{
    SimulationError,
    chip::{ActiveChip, ChipSchedule},
    config::SimulationConfig,
    state::{RevertedSquad, SeasonState},
};

/// Free transfers granted when the squad is rebuilt at will.
#[expect(clippy::cast_possible_truncation)]
const UNLIMITED_FREE_TRANSFERS: u32 = SQUAD_SIZE as u32;

/// Optimizer settings for one gameweek.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameweekPlan {
    pub event: u32,
    pub chip: ActiveChip,
    pub budget: Price,
    pub free_transfers: u32,
    pub transfer_penalty: f64,
    pub transfer_limit: usize,
    pub lookahead: u32,
}

/// Moves `state` into gameweek `event` and returns the settings for its selection.
///
/// `market` holds this gameweek's market prices. Reverts the squad after a free hit and
/// snapshots it when a free hit is played now.
pub fn advance(
    event: u32,
    state: &mut SeasonState,
    schedule: &ChipSchedule,
    config: &SimulationConfig,
    market: &PriceTable,
) -> Result<GameweekPlan, SimulationError> {
    let chip = schedule.active(event);
    if event == 0 {
        return Err(SimulationError::InvalidArgument(
            "gameweeks start at 1".into(),
        ));
    }
    if event == 1 && chip.relaxes_transfers() {
        return Err(SimulationError::InvalidArgument(format!(
            "{chip} cannot be played in gameweek 1"
        )));
    }

    if event == 1 {
        return Ok(GameweekPlan {
            event,
            chip,
            budget: config.starting_budget,
            free_transfers: UNLIMITED_FREE_TRANSFERS,
            transfer_penalty: 0.0,
            transfer_limit: SQUAD_SIZE,
            lookahead: config.lookahead.from_scratch,
        });
    }

    if schedule.active(event - 1).is_free_hit() {
        if let Some(reverted) = state.reverted.take() {
            log::debug!("gameweek {event}: restoring the squad from before the free hit");
            state.existing_squad = Some(reverted.squad);
            state.bank = reverted.bank;
            state.ledger = reverted.ledger;
        }
    }

    let Some(squad) = &state.existing_squad else {
        return Err(SimulationError::InvalidArgument(format!(
            "no squad carried into gameweek {event}"
        )));
    };
    let effective = state.ledger.effective_prices(market)?;
    let budget = team_value(squad, &effective)? + state.bank;

    if chip.is_free_hit() {
        state.reverted = Some(RevertedSquad {
            squad: squad.clone(),
            bank: state.bank,
            ledger: state.ledger.clone(),
        });
    }

    let free_transfers = if chip.relaxes_transfers() {
        UNLIMITED_FREE_TRANSFERS
    } else if state.transfers_made_last_gameweek == 0 {
        2
    } else {
        1
    };
    let (transfer_penalty, transfer_limit) = if chip.relaxes_transfers() {
        (0.0, SQUAD_SIZE)
    } else {
        (config.transfer_penalty, config.transfer_limit)
    };
    let lookahead = match chip {
        ActiveChip::Wildcard => config.lookahead.wildcard,
        ActiveChip::FreeHit => 0,
        ActiveChip::None | ActiveChip::TripleCaptain | ActiveChip::BenchBoost => {
            config.lookahead.default
        }
    };

    Ok(GameweekPlan {
        event,
        chip,
        budget,
        free_transfers,
        transfer_penalty,
        transfer_limit,
        lookahead,
    })
}

impl SeasonState {
    /// Books `squad` as the result of `plan`'s selection and returns the new bank.
    ///
    /// `effective` must be the table the selection was priced with, so that owned
    /// players count at their selling price. Newcomers are recorded in the ledger at
    /// their `market` price. Nothing changes if a price is missing.
    pub fn record_selection(
        &mut self,
        squad: Squad,
        transfers_made: u32,
        plan: &GameweekPlan,
        effective: &PriceTable,
        market: &PriceTable,
    ) -> Result<Price, EngineError> {
        let bank = plan.budget - team_value(&squad, effective)?;
        self.ledger.update(&squad, market)?;
        self.bank = bank;
        self.existing_squad = Some(squad);
        self.transfers_made_last_gameweek = transfers_made;
        Ok(bank)
    }
}
