use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Transaction kind (buy or sell)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Buy,
    Sell,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Buy => "buy",
            TransactionKind::Sell => "sell",
        }
    }

    /// Signed contribution of `amount` to the fund: buys add, sells remove.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            TransactionKind::Buy => amount,
            TransactionKind::Sell => -amount,
        }
    }
}

impl FromStr for TransactionKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(TransactionKind::Buy),
            "sell" => Ok(TransactionKind::Sell),
            _ => Err(()),
        }
    }
}

/// A buy or sell event on the fund
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Option<i64>,
    pub kind: TransactionKind,
    pub amount: Decimal,
    /// None when the stored date could not be parsed
    pub effective_date: Option<NaiveDate>,
    /// Fund total immediately after this transaction
    pub resulting_total: Decimal,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        amount: Decimal,
        effective_date: NaiveDate,
        resulting_total: Decimal,
    ) -> Self {
        Self {
            id: None,
            kind,
            amount,
            effective_date: Some(effective_date),
            resulting_total,
        }
    }

    pub fn signed_amount(&self) -> Decimal {
        self.kind.signed(self.amount)
    }
}

/// Manually entered valuation of the fund
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AumSnapshot {
    pub id: Option<i64>,
    pub amount: Decimal,
    /// Server-assigned; None when missing or out of range
    pub recorded_at: Option<DateTime<Utc>>,
}

impl AumSnapshot {
    pub fn new(amount: Decimal, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            amount,
            recorded_at: Some(recorded_at),
        }
    }
}

/// Current fund total (single row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundTotal {
    pub amount: Decimal,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Sort transactions ascending by effective date.
///
/// The sort is stable, so ties keep arrival order; undated transactions
/// go last.
pub fn sort_transactions(transactions: &mut [Transaction]) {
    transactions.sort_by_key(|t| (t.effective_date.is_none(), t.effective_date));
}

/// Sort snapshots ascending by timestamp; untimestamped ones go last.
pub fn sort_snapshots(snapshots: &mut [AumSnapshot]) {
    snapshots.sort_by_key(|s| (s.recorded_at.is_none(), s.recorded_at));
}
