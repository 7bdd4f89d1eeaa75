use crate::errors::CoreError;
use crate::models::holding::{round_cents, Holding, HoldingRow};
use crate::models::portfolio::Portfolio;

/// Store rules for holdings: input normalization, upsert, removal, totals.
///
/// No I/O and no quote lookups happen here.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Trim and uppercase a symbol. Empty (or whitespace-only) input is a
    /// validation error.
    pub fn normalize_symbol(&self, symbol: &str) -> Result<String, CoreError> {
        let normalized = symbol.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(CoreError::Validation("Enter a valid symbol".into()));
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(CoreError::Validation(format!(
                "Symbol '{normalized}' must not contain spaces"
            )));
        }
        Ok(normalized)
    }

    /// Parse a quantity typed by the user: ASCII digits only, strictly
    /// positive.
    pub fn parse_quantity(&self, input: &str) -> Result<u64, CoreError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(CoreError::Validation(format!(
                "Quantity '{trimmed}' must be a positive whole number"
            )));
        }
        let quantity: u64 = trimmed.parse().map_err(|_| {
            CoreError::Validation(format!("Quantity '{trimmed}' is too large"))
        })?;
        self.validate_quantity(quantity)
    }

    pub fn validate_quantity(&self, quantity: u64) -> Result<u64, CoreError> {
        if quantity == 0 {
            return Err(CoreError::Validation(
                "Quantity must be greater than zero".into(),
            ));
        }
        Ok(quantity)
    }

    /// Insert or fully replace the holding for `symbol`. No merging with a
    /// previous quantity or price.
    ///
    /// `symbol` must already be normalized and `last_price` must be a real
    /// quote (finite, positive).
    pub fn add_or_update(
        &self,
        portfolio: &mut Portfolio,
        symbol: &str,
        quantity: u64,
        last_price: f64,
    ) -> Result<Option<Holding>, CoreError> {
        self.validate_quantity(quantity)?;
        if !last_price.is_finite() || last_price <= 0.0 {
            return Err(CoreError::PriceUnavailable {
                symbol: symbol.to_string(),
            });
        }
        Ok(portfolio.insert(Holding::new(symbol, quantity, last_price)))
    }

    /// Remove the holding for `symbol`, if any.
    pub fn remove(&self, portfolio: &mut Portfolio, symbol: &str) -> Option<Holding> {
        portfolio.remove(symbol)
    }

    /// Replace the last price of an existing holding. Returns `false` if the
    /// symbol is not held or the price is unusable.
    pub fn update_price(&self, portfolio: &mut Portfolio, symbol: &str, last_price: f64) -> bool {
        if !last_price.is_finite() || last_price <= 0.0 {
            return false;
        }
        match portfolio.get_mut(symbol) {
            Some(holding) => {
                holding.last_price = last_price;
                true
            }
            None => false,
        }
    }

    /// Total market value: each row is rounded to cents first (matching the
    /// table), the rounded rows are summed, and the sum is rounded again to
    /// drop float noise.
    pub fn total_value(&self, portfolio: &Portfolio) -> f64 {
        let sum = portfolio
            .holdings()
            .map(Holding::value)
            .fold(0.0, |acc, v| acc + v);
        // `+ 0.0` turns a negative zero into a positive one.
        round_cents(sum) + 0.0
    }

    /// Table rows in symbol order.
    pub fn rows(&self, portfolio: &Portfolio) -> Vec<HoldingRow> {
        portfolio.holdings().map(HoldingRow::from).collect()
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}
