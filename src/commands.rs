//! Internal command model
//!
//! The clap surface is converted into these commands by `cli::runner`, which
//! also validates raw user input. Dispatchers only ever see typed values.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

use fundtrack::db::TransactionKind;
use fundtrack::error::FundError;
use fundtrack::utils::{parse_effective_date, timestamp_from_epoch};

/// Parsed, validated command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `buy|sell <amount> <date>`
    Record {
        kind: TransactionKind,
        amount: Decimal,
        date: NaiveDate,
    },
    /// `transactions list`
    TransactionsList,
    /// `aum add <amount> [--at <epoch>]`
    AumAdd {
        amount: Decimal,
        at: Option<DateTime<Utc>>,
    },
    /// `aum list`
    AumList,
    /// `performance windows`
    PerformanceWindows,
    /// `performance twr`
    PerformanceTwr,
    /// `dashboard [--public]`
    Dashboard { public: bool },
}

/// Parse a transaction amount: a number strictly greater than zero
pub fn parse_transaction_amount(s: &str) -> Result<Decimal, FundError> {
    match Decimal::from_str(s.trim()) {
        Ok(amount) if amount > Decimal::ZERO => Ok(amount),
        _ => Err(FundError::InvalidAmount(s.to_string())),
    }
}

/// Parse an AUM valuation: a number, zero allowed
pub fn parse_aum_amount(s: &str) -> Result<Decimal, FundError> {
    match Decimal::from_str(s.trim()) {
        Ok(amount) if amount >= Decimal::ZERO => Ok(amount),
        _ => Err(FundError::InvalidAmount(s.to_string())),
    }
}

/// Parse a required `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate, FundError> {
    parse_effective_date(s).ok_or_else(|| FundError::InvalidDate(s.to_string()))
}

/// Parse an epoch-seconds timestamp
pub fn parse_timestamp(secs: i64) -> Result<DateTime<Utc>, FundError> {
    timestamp_from_epoch(secs).ok_or_else(|| FundError::InvalidDate(secs.to_string()))
}
