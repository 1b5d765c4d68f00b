use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::db::{AumSnapshot, Transaction};
use crate::utils::{date_label, date_start_utc};

/// One point of the cumulative return curve
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwrPoint {
    /// End of the sub-period (the later snapshot's timestamp)
    pub at: DateTime<Utc>,
    pub label: String,
    /// Cumulative return in percent
    pub value: Decimal,
}

/// Cumulative time-weighted return curve, one point per consecutive pair of
/// AUM snapshots
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TwrSeries {
    points: Vec<TwrPoint>,
}

impl TwrSeries {
    pub fn points(&self) -> &[TwrPoint] {
        &self.points
    }

    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }

    pub fn values(&self) -> Vec<Decimal> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Latest cumulative return, for textual summaries
    pub fn latest(&self) -> Option<&TwrPoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Net cash flow of transactions dated in `(start, end]`: buys add, sells
/// subtract. Transactions without a date are ignored.
///
/// Returns `None` on arithmetic overflow.
pub fn net_flow_between(
    transactions: &[Transaction],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Option<Decimal> {
    transactions
        .iter()
        .filter(|t| {
            t.effective_date
                .map(date_start_utc)
                .is_some_and(|at| at > start && at <= end)
        })
        .try_fold(Decimal::ZERO, |acc, t| acc.checked_add(t.signed_amount()))
}

/// Growth factor `1 + r` for one sub-period, or `None` when the sub-period
/// has to be skipped (missing timestamp, non-positive starting amount,
/// overflow).
///
/// `r = profit / start_amount` where profit is the net buy/sell flow inside
/// the sub-period. This nets known flows out of the amount delta instead of
/// weighting them by timing, so it approximates TWR rather than computing a
/// Modified Dietz return.
fn sub_period_factor(
    prev: &AumSnapshot,
    curr: &AumSnapshot,
    transactions: &[Transaction],
) -> Option<Decimal> {
    let start = prev.recorded_at?;
    let end = curr.recorded_at?;
    if prev.amount <= Decimal::ZERO {
        return None;
    }

    let profit = net_flow_between(transactions, start, end)?;
    let r = profit.checked_div(prev.amount)?;
    Decimal::ONE.checked_add(r)
}

fn cumulative_return_pct(cumulative: Decimal) -> Option<Decimal> {
    cumulative
        .checked_sub(Decimal::ONE)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// Compute the TWR series, using the wall clock for snapshots missing a
/// timestamp.
pub fn compute_twr_series(
    snapshots: &[AumSnapshot],
    transactions: &[Transaction],
) -> TwrSeries {
    compute_twr_series_at(snapshots, transactions, Utc::now())
}

/// Compute the cumulative time-weighted return series.
///
/// Snapshots must be ordered by timestamp. Fewer than two snapshots yields
/// an empty series; otherwise the series has exactly one point per
/// consecutive pair. A skipped sub-period still emits a point, carrying the
/// running return forward unchanged.
pub fn compute_twr_series_at(
    snapshots: &[AumSnapshot],
    transactions: &[Transaction],
    now: DateTime<Utc>,
) -> TwrSeries {
    if snapshots.len() < 2 {
        return TwrSeries::default();
    }

    let mut cumulative = Decimal::ONE;
    let mut value = Decimal::ZERO;

    let points = snapshots
        .windows(2)
        .map(|pair| {
            let (prev, curr) = (&pair[0], &pair[1]);

            let updated = sub_period_factor(prev, curr, transactions)
                .and_then(|factor| cumulative.checked_mul(factor))
                .and_then(|next| cumulative_return_pct(next).map(|pct| (next, pct)));

            match updated {
                Some((next, next_value)) => {
                    cumulative = next;
                    value = next_value;
                }
                None => debug!(
                    "Skipping sub-period ending {:?} (start amount {})",
                    curr.recorded_at, prev.amount
                ),
            }

            let at = curr.recorded_at.unwrap_or(now);
            TwrPoint {
                at,
                label: date_label(at),
                value,
            }
        })
        .collect();

    TwrSeries { points }
}
