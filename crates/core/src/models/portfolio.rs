use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::holding::{Holding, HoldingRecord};
use crate::errors::CoreError;

/// The whole store: symbol → holding.
///
/// Serialized as a flat JSON object,
/// `{ "AAPL": { "quantity": 10, "last_price": 150.0 }, ... }`.
/// Keys are kept sorted so the table and the symbol selector list
/// holdings in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, HoldingRecord>",
    into = "BTreeMap<String, HoldingRecord>"
)]
pub struct Portfolio {
    holdings: BTreeMap<String, Holding>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, symbol: &str) -> Option<&Holding> {
        self.holdings.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.holdings.contains_key(symbol)
    }

    /// Insert a holding, replacing any previous one for the same symbol.
    /// Returns the replaced holding, if any.
    pub fn insert(&mut self, holding: Holding) -> Option<Holding> {
        self.holdings.insert(holding.symbol.clone(), holding)
    }

    pub fn remove(&mut self, symbol: &str) -> Option<Holding> {
        self.holdings.remove(symbol)
    }

    pub(crate) fn get_mut(&mut self, symbol: &str) -> Option<&mut Holding> {
        self.holdings.get_mut(symbol)
    }

    /// Holdings in symbol order.
    pub fn holdings(&self) -> impl Iterator<Item = &Holding> {
        self.holdings.values()
    }

    /// Symbols in sorted order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.holdings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

/// Loading applies the same rules as adding: symbols are trimmed and
/// uppercased, quantities are positive, prices are finite and positive.
impl TryFrom<BTreeMap<String, HoldingRecord>> for Portfolio {
    type Error = CoreError;

    fn try_from(records: BTreeMap<String, HoldingRecord>) -> Result<Self, Self::Error> {
        let mut holdings = BTreeMap::new();
        for (key, r) in records {
            let symbol = key.trim().to_uppercase();
            if symbol.is_empty() {
                return Err(CoreError::Deserialization("empty symbol in state file".into()));
            }
            if r.quantity == 0 {
                return Err(CoreError::Deserialization(format!(
                    "{symbol}: quantity must be greater than zero"
                )));
            }
            if !r.last_price.is_finite() || r.last_price <= 0.0 {
                return Err(CoreError::Deserialization(format!(
                    "{symbol}: invalid last price {}",
                    r.last_price
                )));
            }
            if holdings.contains_key(&symbol) {
                return Err(CoreError::Deserialization(format!(
                    "{symbol} appears more than once in state file"
                )));
            }
            let holding = Holding::new(symbol.clone(), r.quantity, r.last_price);
            holdings.insert(symbol, holding);
        }
        Ok(Self { holdings })
    }
}

impl From<Portfolio> for BTreeMap<String, HoldingRecord> {
    fn from(portfolio: Portfolio) -> Self {
        portfolio
            .holdings
            .iter()
            .map(|(symbol, h)| (symbol.clone(), HoldingRecord::from(h)))
            .collect()
    }
}
