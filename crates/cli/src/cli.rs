//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Track stock holdings, their value, and their price history.
#[derive(Parser, Debug)]
#[command(
    name = "portfolio-tracker",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track stock holdings, their value, and their price history"
)]
pub struct CliApp {
    /// The command to execute (defaults to the interactive shell)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a TOML settings file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Portfolio state file (overrides config and PORTFOLIO_FILE)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a holding, or replace the quantity of an existing one
    Add {
        /// Ticker symbol (e.g., AAPL)
        symbol: String,
        /// Number of units held (positive whole number)
        quantity: String,
    },

    /// Remove a holding
    #[command(alias = "rm")]
    Remove {
        /// Ticker symbol to remove
        symbol: Option<String>,
    },

    /// Show the holdings table and total value
    #[command(alias = "ls")]
    List,

    /// Draw the daily price history of a held symbol
    Chart {
        /// Ticker symbol (must be in the portfolio)
        symbol: String,
    },

    /// Re-fetch the last price of every holding
    Refresh,

    /// Print the state file contents
    Export,

    /// Interactive session
    Shell,
}
