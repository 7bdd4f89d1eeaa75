pub mod errors;
pub mod models;
pub mod notify;
pub mod providers;
pub mod services;
pub mod storage;

use std::path::{Path, PathBuf};

use models::{
    chart::PriceChart,
    holding::{Holding, HoldingRow},
    portfolio::Portfolio,
    price::PriceSeries,
    settings::Settings,
};
use notify::Notifier;
use providers::registry::QuoteProviderRegistry;
use services::{
    chart_service::ChartService,
    portfolio_service::PortfolioService,
    quote_service::{QuoteService, UNAVAILABLE_PRICE},
};
use storage::manager::StorageManager;

use errors::CoreError;

/// Main entry point for the Portfolio Tracker core library.
/// Owns the one portfolio of the process and the services that act on it.
///
/// Every successful mutation is written to the state file before the call
/// returns. If the write fails the in-memory change is rolled back, so
/// memory and disk never disagree.
#[must_use]
pub struct PortfolioTracker {
    portfolio: Portfolio,
    path: PathBuf,
    portfolio_service: PortfolioService,
    quote_service: QuoteService,
    chart_service: ChartService,
}

impl std::fmt::Debug for PortfolioTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioTracker")
            .field("holdings", &self.portfolio.len())
            .field("path", &self.path)
            .field("providers", &self.quote_service.provider_names())
            .finish()
    }
}

impl PortfolioTracker {
    /// Load the portfolio named by `settings` (empty if the file does not
    /// exist) and wire up the default quote providers.
    pub fn open(settings: &Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let registry = QuoteProviderRegistry::new_with_defaults(settings);
        Self::open_with_registry(&settings.portfolio_path, registry)
    }

    /// Load the portfolio at `path` using a caller-supplied provider chain.
    pub fn open_with_registry(
        path: impl AsRef<Path>,
        registry: QuoteProviderRegistry,
    ) -> Result<Self, CoreError> {
        let path = path.as_ref().to_path_buf();
        let portfolio = StorageManager::load_from_file(&path)?;
        Ok(Self::build(portfolio, path, registry))
    }

    /// Wrap an already loaded portfolio. Nothing is read from `path`; it is
    /// only where later mutations are saved.
    pub fn from_parts(
        portfolio: Portfolio,
        path: impl Into<PathBuf>,
        registry: QuoteProviderRegistry,
    ) -> Self {
        Self::build(portfolio, path.into(), registry)
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Add a holding from raw form input, or replace the existing one.
    ///
    /// The symbol is trimmed and uppercased and the quantity must be a
    /// positive whole number. Both are checked before any network call.
    /// The current price is then fetched; if it is unavailable the store
    /// is left untouched.
    pub async fn add_or_update(&mut self, symbol: &str, quantity: &str) -> Result<Holding, CoreError> {
        let quantity = self.portfolio_service.parse_quantity(quantity)?;
        self.add_or_update_quantity(symbol, quantity).await
    }

    /// Same as [`add_or_update`](Self::add_or_update) with an already
    /// parsed quantity.
    pub async fn add_or_update_quantity(
        &mut self,
        symbol: &str,
        quantity: u64,
    ) -> Result<Holding, CoreError> {
        let symbol = self.portfolio_service.normalize_symbol(symbol)?;
        self.portfolio_service.validate_quantity(quantity)?;

        let last_price = self.quote_service.fetch_last_price(&symbol).await;
        if last_price == UNAVAILABLE_PRICE {
            return Err(CoreError::PriceUnavailable { symbol });
        }

        let previous = self.portfolio_service.add_or_update(
            &mut self.portfolio,
            &symbol,
            quantity,
            last_price,
        )?;

        if let Err(e) = self.persist() {
            match previous {
                Some(old) => {
                    self.portfolio.insert(old);
                }
                None => {
                    self.portfolio.remove(&symbol);
                }
            }
            return Err(e);
        }

        tracing::info!(%symbol, quantity, last_price, "holding saved");
        Ok(Holding::new(symbol, quantity, last_price))
    }

    /// Remove the selected holding.
    ///
    /// With no selection, or a symbol that is not held, nothing changes:
    /// the user is told through `notifier` and `Ok(None)` is returned.
    pub fn remove(
        &mut self,
        selection: Option<&str>,
        notifier: &dyn Notifier,
    ) -> Result<Option<Holding>, CoreError> {
        let symbol = match selection.map(|s| s.trim().to_uppercase()) {
            Some(s) if !s.is_empty() => s,
            _ => {
                notifier.info("Select a holding to remove.");
                return Ok(None);
            }
        };

        let Some(removed) = self.portfolio_service.remove(&mut self.portfolio, &symbol) else {
            notifier.info(&format!("{symbol} is not in the portfolio."));
            return Ok(None);
        };

        if let Err(e) = self.persist() {
            self.portfolio.insert(removed);
            return Err(e);
        }

        tracing::info!(%symbol, "holding removed");
        Ok(Some(removed))
    }

    /// Re-fetch the last price of every holding. Holdings whose lookup
    /// fails keep their previous price. Returns how many were updated.
    pub async fn refresh_prices(&mut self) -> Result<usize, CoreError> {
        let symbols = self.symbols();
        let mut fetched = Vec::with_capacity(symbols.len());

        for symbol in &symbols {
            let price = self.quote_service.fetch_last_price(symbol).await;
            if price != UNAVAILABLE_PRICE {
                fetched.push((symbol, price));
            }
        }

        // No await below: a refresh dropped mid-flight leaves the store as it was.
        let before = self.portfolio.clone();
        let mut updated = 0;
        for (symbol, price) in fetched {
            if self.portfolio_service.update_price(&mut self.portfolio, symbol, price) {
                updated += 1;
            }
        }

        if updated > 0 {
            if let Err(e) = self.persist() {
                self.portfolio = before;
                return Err(e);
            }
        }

        tracing::info!(updated, total = symbols.len(), "prices refreshed");
        Ok(updated)
    }

    // ── Persistence ─────────────────────────────────────────────────

    /// Write the whole store to the state file.
    pub fn persist(&self) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.portfolio, &self.path)
    }

    /// Replace the in-memory store with what is on disk.
    pub fn reload(&mut self) -> Result<(), CoreError> {
        self.portfolio = StorageManager::load_from_file(&self.path)?;
        Ok(())
    }

    /// Pretty JSON snapshot of the store, same shape as the state file.
    pub fn to_json(&self) -> Result<String, CoreError> {
        StorageManager::save_to_string(&self.portfolio)
    }

    // ── Reads ───────────────────────────────────────────────────────

    #[must_use]
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&Holding> {
        self.portfolio.get(&symbol.trim().to_uppercase())
    }

    /// Held symbols, sorted. Feeds the chart selector.
    #[must_use]
    pub fn symbols(&self) -> Vec<String> {
        self.portfolio.symbols().map(str::to_string).collect()
    }

    /// Rows for the holdings table.
    #[must_use]
    pub fn rows(&self) -> Vec<HoldingRow> {
        self.portfolio_service.rows(&self.portfolio)
    }

    /// Sum of the table's row values, in USD.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.portfolio_service.total_value(&self.portfolio)
    }

    #[must_use]
    pub fn provider_names(&self) -> Vec<String> {
        self.quote_service.provider_names()
    }

    // ── Quotes & Charts ─────────────────────────────────────────────

    /// Latest price, or `0.0` when unavailable.
    pub async fn fetch_last_price(&self, symbol: &str) -> f64 {
        self.quote_service.fetch_last_price(&symbol.trim().to_uppercase()).await
    }

    /// Daily history for any symbol. Empty (with a message through
    /// `notifier`) when the service has nothing.
    pub async fn price_history(&self, symbol: &str, notifier: &dyn Notifier) -> PriceSeries {
        self.quote_service
            .fetch_price_history(&symbol.trim().to_uppercase(), notifier)
            .await
    }

    /// Chart for a held symbol. Symbols that are not held are not charted.
    /// `None` means there is nothing to plot; the reason has already been
    /// reported through `notifier`.
    pub async fn chart(&self, symbol: &str, notifier: &dyn Notifier) -> Option<PriceChart> {
        let symbol = symbol.trim().to_uppercase();
        if !self.portfolio.contains(&symbol) {
            notifier.info(&format!("{symbol} is not in the portfolio."));
            return None;
        }
        let series = self.quote_service.fetch_price_history(&symbol, notifier).await;
        self.chart_service.build_chart(&series)
    }

    /// Access to the chart helpers (e.g. downsampling for narrow displays).
    #[must_use]
    pub fn chart_service(&self) -> &ChartService {
        &self.chart_service
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(portfolio: Portfolio, path: PathBuf, registry: QuoteProviderRegistry) -> Self {
        Self {
            portfolio,
            path,
            portfolio_service: PortfolioService::new(),
            quote_service: QuoteService::new(registry),
            chart_service: ChartService::new(),
        }
    }
}
