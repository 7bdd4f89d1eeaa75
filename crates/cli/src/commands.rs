//! Actions shared by the one-shot subcommands and the interactive shell.

use anyhow::Result;
use std::future::Future;

use portfolio_tracker_core::notify::Notifier;
use portfolio_tracker_core::PortfolioTracker;

use crate::render::{self, CHART_HEIGHT, CHART_WIDTH};

/// Result of an action that touches the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Cancelled,
}

/// Run `fut` unless Ctrl-C arrives first. A cancelled future is dropped
/// before it can touch the store.
pub async fn cancellable<F, T>(fut: F) -> Option<T>
where
    F: Future<Output = T>,
{
    tokio::select! {
        out = fut => Some(out),
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("action cancelled by user");
            None
        }
    }
}

pub fn list(tracker: &PortfolioTracker) {
    print!("{}", render::render_table(&tracker.rows(), tracker.total_value()));
}

pub async fn add(
    tracker: &mut PortfolioTracker,
    notifier: &dyn Notifier,
    symbol: &str,
    quantity: &str,
) -> Result<Outcome> {
    let Some(result) = cancellable(tracker.add_or_update(symbol, quantity)).await else {
        notifier.info("Cancelled.");
        return Ok(Outcome::Cancelled);
    };
    let holding = result?;
    notifier.info(&format!(
        "Saved {}: {} @ {}",
        holding.symbol,
        holding.quantity,
        render::format_usd(holding.last_price)
    ));
    list(tracker);
    Ok(Outcome::Done)
}

/// Returns whether anything was removed.
pub fn remove(
    tracker: &mut PortfolioTracker,
    notifier: &dyn Notifier,
    selection: Option<&str>,
) -> Result<bool> {
    match tracker.remove(selection, notifier)? {
        Some(removed) => {
            notifier.info(&format!("Removed {}.", removed.symbol));
            list(tracker);
            Ok(true)
        }
        None => Ok(false),
    }
}

pub async fn refresh(tracker: &mut PortfolioTracker, notifier: &dyn Notifier) -> Result<Outcome> {
    if tracker.portfolio().is_empty() {
        notifier.info("Nothing to refresh.");
        return Ok(Outcome::Done);
    }
    let Some(result) = cancellable(tracker.refresh_prices()).await else {
        notifier.info("Cancelled.");
        return Ok(Outcome::Cancelled);
    };
    let updated = result?;
    let total = tracker.portfolio().len();
    notifier.info(&format!("Updated {updated} of {total} prices."));
    if updated < total {
        notifier.error("Some prices could not be fetched; their last known price was kept.");
    }
    list(tracker);
    Ok(Outcome::Done)
}

pub async fn chart(
    tracker: &PortfolioTracker,
    notifier: &dyn Notifier,
    symbol: &str,
) -> Outcome {
    let Some(chart) = cancellable(tracker.chart(symbol, notifier)).await else {
        notifier.info("Cancelled.");
        return Outcome::Cancelled;
    };
    if let Some(chart) = chart {
        let points = tracker.chart_service().downsample(&chart.points, CHART_WIDTH);
        print!("{}", render::render_chart(&chart, &points, CHART_HEIGHT));
    }
    Outcome::Done
}

pub fn export(tracker: &PortfolioTracker) -> Result<()> {
    println!("{}", tracker.to_json()?);
    Ok(())
}
