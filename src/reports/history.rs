use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::db::Transaction;
use crate::utils::DATE_FORMAT;

/// Fund total right after a transaction, for the fund-points chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub label: String,
    pub date: Option<NaiveDate>,
    pub total: Decimal,
}

/// One point per transaction: its date and the resulting fund total.
pub fn fund_points(transactions: &[Transaction]) -> Vec<HistoryPoint> {
    transactions
        .iter()
        .map(|t| HistoryPoint {
            label: t
                .effective_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| "-".to_string()),
            date: t.effective_date,
            total: t.resulting_total,
        })
        .collect()
}
