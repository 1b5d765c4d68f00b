use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod formatters;
pub mod runner;

#[derive(Parser)]
#[command(name = "fundtrack")]
#[command(version, about = "Single-fund AUM tracker with performance reporting")]
#[command(
    long_about = "Record buys, sells and AUM valuations for one fund, then report percentage change over fixed look-back windows and a cash-flow-neutral time-weighted return curve."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Database file (overrides FUNDTRACK_DB and the config file)
    #[arg(long = "db", global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a buy: money added to the fund
    Buy {
        /// Amount (greater than zero)
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Effective date (YYYY-MM-DD)
        date: String,
    },

    /// Record a sell: money taken out of the fund
    Sell {
        /// Amount (greater than zero)
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Effective date (YYYY-MM-DD)
        date: String,
    },

    /// Transaction ledger
    Transactions {
        #[command(subcommand)]
        action: TransactionCommands,
    },

    /// Assets-under-management valuations
    Aum {
        #[command(subcommand)]
        action: AumCommands,
    },

    /// Performance reports
    Performance {
        #[command(subcommand)]
        action: PerformanceCommands,
    },

    /// Total, performance and history at a glance
    Dashboard {
        /// Public view: hide the transaction list
        #[arg(long)]
        public: bool,
    },
}

#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List transactions with the resulting fund total
    List,
}

#[derive(Subcommand)]
pub enum AumCommands {
    /// Record a valuation of the fund (timestamped now unless --at is given)
    Add {
        /// Fund valuation (zero or more)
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Timestamp as epoch seconds
        #[arg(long)]
        at: Option<i64>,
    },

    /// List recorded valuations
    List,
}

#[derive(Subcommand)]
pub enum PerformanceCommands {
    /// Percentage change over 24h, 5d, 1mo, 3mo, 6mo, ytd, 1y, 5y and all
    Windows,

    /// Cumulative time-weighted return between AUM snapshots
    Twr,
}
