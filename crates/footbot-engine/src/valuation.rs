//! Price tracking: purchase prices, selling prices and squad value.
//!
//! A player bought at `p` and now priced at `c` sells for `c` when `c <= p`, otherwise
//! for `p + floor((c - p) / 2)`. Owned players therefore enter every optimization at
//! their selling price, while the rest of the pool stays at market price.
//!
//! # Example
//!
//! ```
//! use footbot_engine::valuation::selling_price;
//!
//! assert_eq!(selling_price(40, 45), 42);
//! assert_eq!(selling_price(40, 39), 39);
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::{
    EngineError,
    player::{ElementId, Player, Price},
    squad::Squad,
};

/// Price credited when selling a player bought at `purchase_price`.
///
/// Losses pass through in full; profit is halved and rounded down.
#[must_use]
pub const fn selling_price(purchase_price: Price, current_price: Price) -> Price {
    if current_price <= purchase_price {
        current_price
    } else {
        purchase_price + (current_price - purchase_price) / 2
    }
}

/// Per-element prices for one gameweek.
///
/// Looking up an element that is not in the table is a [`EngineError::MissingPlayer`]:
/// every owned or selected player must come from the same pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceTable {
    prices: HashMap<ElementId, Price>,
}

impl PriceTable {
    #[must_use]
    pub fn from_players(players: &[Player]) -> Self {
        Self {
            prices: players.iter().map(|p| (p.element, p.price)).collect(),
        }
    }

    pub fn price(&self, element: ElementId) -> Result<Price, EngineError> {
        self.prices
            .get(&element)
            .copied()
            .ok_or(EngineError::MissingPlayer(element))
    }

    /// Overwrites each player's `price` with the price in this table.
    pub fn apply_to(&self, players: &mut [Player]) -> Result<(), EngineError> {
        for player in players {
            player.price = self.price(player.element)?;
        }
        Ok(())
    }
}

/// Sum of prices over the squad.
///
/// Pass an effective table (see [`PurchasePriceLedger::effective_prices`]) to value a
/// squad at what it would sell for.
pub fn team_value(squad: &Squad, prices: &PriceTable) -> Result<Price, EngineError> {
    squad.iter().map(|element| prices.price(element)).sum()
}

/// Purchase price of every currently owned player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchasePriceLedger {
    entries: BTreeMap<ElementId, Price>,
}

impl PurchasePriceLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn purchase_price(&self, element: ElementId) -> Option<Price> {
        self.entries.get(&element).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, Price)> + '_ {
        self.entries.iter().map(|(&e, &p)| (e, p))
    }

    /// Brings the ledger in line with `squad`.
    ///
    /// Newcomers are recorded at their current market price, departed players are
    /// dropped and retained players keep their original purchase price. The ledger is
    /// untouched if any newcomer is missing from `market`.
    pub fn update(&mut self, squad: &Squad, market: &PriceTable) -> Result<(), EngineError> {
        let newcomers = squad
            .iter()
            .filter(|element| !self.entries.contains_key(element))
            .map(|element| Ok((element, market.price(element)?)))
            .collect::<Result<Vec<_>, EngineError>>()?;
        self.entries.retain(|&element, _| squad.contains(element));
        self.entries.extend(newcomers);
        Ok(())
    }

    /// Market prices with every owned player replaced by its selling price.
    pub fn effective_prices(&self, market: &PriceTable) -> Result<PriceTable, EngineError> {
        let mut effective = market.clone();
        for (element, purchase_price) in self.iter() {
            let current = market.price(element)?;
            effective
                .prices
                .insert(element, selling_price(purchase_price, current));
        }
        Ok(effective)
    }
}
