use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::price::PricePoint;

/// Trait abstraction for quote data sources.
///
/// Alpha Vantage is the primary implementation; Yahoo Finance can be
/// registered behind it as a fallback. Tests plug in mocks here.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Latest traded price for `symbol`.
    async fn get_last_price(&self, symbol: &str) -> Result<f64, CoreError>;

    /// Daily closing prices for `symbol`. Order is unspecified; callers
    /// sort.
    async fn get_daily_history(&self, symbol: &str) -> Result<Vec<PricePoint>, CoreError>;
}
