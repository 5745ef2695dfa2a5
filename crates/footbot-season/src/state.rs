use footbot_engine::{Price, PurchasePriceLedger, Squad};
use serde::{Deserialize, Serialize};

/// What a season carries from one gameweek to the next.
///
/// Created empty before gameweek 1 and updated once per gameweek by
/// [`advance`](crate::advance) and [`SeasonState::record_selection`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonState {
    pub(crate) existing_squad: Option<Squad>,
    pub(crate) bank: Price,
    pub(crate) ledger: PurchasePriceLedger,
    pub(crate) transfers_made_last_gameweek: u32,
    pub(crate) reverted: Option<RevertedSquad>,
}

/// Snapshot taken when a free hit is played, restored the gameweek after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevertedSquad {
    pub squad: Squad,
    pub bank: Price,
    pub ledger: PurchasePriceLedger,
}

impl SeasonState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn existing_squad(&self) -> Option<&Squad> {
        self.existing_squad.as_ref()
    }

    #[must_use]
    pub fn bank(&self) -> Price {
        self.bank
    }

    #[must_use]
    pub fn ledger(&self) -> &PurchasePriceLedger {
        &self.ledger
    }

    #[must_use]
    pub fn transfers_made_last_gameweek(&self) -> u32 {
        self.transfers_made_last_gameweek
    }

    #[must_use]
    pub fn reverted(&self) -> Option<&RevertedSquad> {
        self.reverted.as_ref()
    }
}
