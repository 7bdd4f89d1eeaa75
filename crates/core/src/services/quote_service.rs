use crate::errors::CoreError;
use crate::models::price::PriceSeries;
use crate::notify::Notifier;
use crate::providers::registry::QuoteProviderRegistry;

/// Price returned by [`QuoteService::fetch_last_price`] when no price could
/// be determined.
pub const UNAVAILABLE_PRICE: f64 = 0.0;

/// Quote client: last price and daily history for a symbol.
///
/// Each lookup is a single attempt per registered provider, in registry
/// order. There is no retry and no caching.
pub struct QuoteService {
    registry: QuoteProviderRegistry,
}

impl QuoteService {
    pub fn new(registry: QuoteProviderRegistry) -> Self {
        Self { registry }
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Latest price for `symbol`, or [`UNAVAILABLE_PRICE`] if every provider
    /// failed. Never returns an error; the cause is logged.
    pub async fn fetch_last_price(&self, symbol: &str) -> f64 {
        match self.try_fetch_last_price(symbol).await {
            Ok(price) => price,
            Err(e) => {
                tracing::warn!(symbol, "last price unavailable: {e}");
                UNAVAILABLE_PRICE
            }
        }
    }

    /// Latest price for `symbol`, keeping the reason a lookup failed.
    ///
    /// Prices that are not finite or not strictly positive are rejected so
    /// they cannot be confused with the sentinel.
    pub async fn try_fetch_last_price(&self, symbol: &str) -> Result<f64, CoreError> {
        if self.registry.is_empty() {
            return Err(CoreError::NoProvider);
        }

        let mut last_error = None;
        for provider in self.registry.providers() {
            match provider.get_last_price(symbol).await {
                Ok(price) if price.is_finite() && price > 0.0 => return Ok(price),
                Ok(price) => {
                    last_error = Some(CoreError::DataUnavailable {
                        symbol: symbol.to_string(),
                        reason: format!("{} returned unusable price {price}", provider.name()),
                    });
                }
                Err(e) => {
                    tracing::debug!(symbol, provider = provider.name(), "quote lookup failed: {e}");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(CoreError::NoProvider))
    }

    /// Daily closes for `symbol`, ascending by date.
    ///
    /// On failure the reason is reported through `notifier` and an empty
    /// series is returned; callers treat that as "nothing to plot".
    pub async fn fetch_price_history(&self, symbol: &str, notifier: &dyn Notifier) -> PriceSeries {
        match self.try_fetch_price_history(symbol).await {
            Ok(series) => series,
            Err(e) => {
                tracing::warn!(symbol, "price history unavailable: {e}");
                notifier.error(&e.to_string());
                PriceSeries::empty(symbol)
            }
        }
    }

    /// Daily closes for `symbol`, ascending by date, keeping the failure
    /// reason. An answer with no points counts as unavailable data.
    pub async fn try_fetch_price_history(&self, symbol: &str) -> Result<PriceSeries, CoreError> {
        if self.registry.is_empty() {
            return Err(CoreError::NoProvider);
        }

        let mut last_error = None;
        for provider in self.registry.providers() {
            match provider.get_daily_history(symbol).await {
                Ok(points) if !points.is_empty() => {
                    return Ok(PriceSeries::new(symbol, points));
                }
                Ok(_) => {
                    last_error = Some(CoreError::DataUnavailable {
                        symbol: symbol.to_string(),
                        reason: format!("{} returned no history", provider.name()),
                    });
                }
                Err(e) => {
                    tracing::debug!(symbol, provider = provider.name(), "history lookup failed: {e}");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(CoreError::NoProvider))
    }
}
