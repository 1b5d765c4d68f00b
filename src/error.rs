//! Error handling for fundtrack
//!
//! Defines the typed errors raised at the input and storage edges, and a
//! unified Result type using anyhow for context chaining. The performance
//! engines themselves never fail; they degrade to neutral values instead.

use thiserror::Error;

/// Errors surfaced by the store, the CLI input layer and configuration
#[derive(Error, Debug)]
pub enum FundError {
    #[error("invalid amount '{0}': must be a number greater than zero")]
    InvalidAmount(String),

    #[error("invalid date '{0}': use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for fund operations
pub type Result<T> = anyhow::Result<T>;
