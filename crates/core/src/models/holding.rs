use serde::{Deserialize, Serialize};

/// A single portfolio entry: one symbol, how many units are held, and the
/// most recently fetched price for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    /// Ticker symbol, trimmed and uppercased (e.g., "AAPL")
    pub symbol: String,

    /// Number of units held
    pub quantity: u64,

    /// Last price fetched from the quote service (USD)
    pub last_price: f64,
}

impl Holding {
    pub fn new(symbol: impl Into<String>, quantity: u64, last_price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            quantity,
            last_price,
        }
    }

    /// Market value of this holding, rounded to cents.
    #[must_use]
    pub fn value(&self) -> f64 {
        round_cents(self.quantity as f64 * self.last_price)
    }
}

/// On-disk shape of a holding. The symbol lives in the enclosing map key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingRecord {
    pub quantity: u64,
    pub last_price: f64,
}

impl From<&Holding> for HoldingRecord {
    fn from(h: &Holding) -> Self {
        Self {
            quantity: h.quantity,
            last_price: h.last_price,
        }
    }
}

/// One row of the holdings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingRow {
    pub symbol: String,
    pub quantity: u64,
    pub last_price: f64,
    /// `quantity × last_price`, rounded to cents
    pub value: f64,
}

impl From<&Holding> for HoldingRow {
    fn from(h: &Holding) -> Self {
        Self {
            symbol: h.symbol.clone(),
            quantity: h.quantity,
            last_price: h.last_price,
            value: h.value(),
        }
    }
}

/// Round a monetary amount to two decimal places.
#[must_use]
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
