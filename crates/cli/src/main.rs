//! Portfolio Tracker - terminal front end.
//!
//! Records stock holdings, prices them through Alpha Vantage, and shows the
//! holdings table, total value, and daily price charts.

mod cli;
mod commands;
mod config;
mod notifier;
mod render;
mod shell;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use portfolio_tracker_core::PortfolioTracker;

use crate::cli::{CliApp, Command};
use crate::commands::Outcome;
use crate::notifier::TerminalNotifier;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (API key goes here, not in the settings file)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    init_logging(app.verbose, app.debug)?;

    let settings = config::resolve(app.config.as_deref(), app.file.as_deref())?;
    tracing::debug!(path = %settings.portfolio_path.display(), "using state file");

    let mut tracker = PortfolioTracker::open(&settings).with_context(|| {
        format!("Failed to open portfolio at {}", settings.portfolio_path.display())
    })?;
    let notifier = TerminalNotifier;

    let outcome = match app.command.unwrap_or(Command::Shell) {
        Command::Add { symbol, quantity } => {
            commands::add(&mut tracker, &notifier, &symbol, &quantity).await?
        }
        Command::Remove { symbol } => {
            commands::remove(&mut tracker, &notifier, symbol.as_deref())?;
            Outcome::Done
        }
        Command::List => {
            commands::list(&tracker);
            Outcome::Done
        }
        Command::Chart { symbol } => commands::chart(&tracker, &notifier, &symbol).await,
        Command::Refresh => commands::refresh(&mut tracker, &notifier).await?,
        Command::Export => {
            commands::export(&tracker)?;
            Outcome::Done
        }
        Command::Shell => {
            shell::run(&mut tracker, &notifier).await?;
            Outcome::Done
        }
    };

    if outcome == Outcome::Cancelled {
        tracing::info!("exiting after cancellation");
    }
    Ok(())
}

/// Explicit flags win; otherwise `RUST_LOG`, otherwise warnings only.
fn init_logging(verbose: bool, debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialise logging: {e}"))?;
    Ok(())
}
