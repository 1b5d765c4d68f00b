//! Fixed-window performance: percentage change of the fund total over the
//! 24h, 5d, 1mo, 3mo, 6mo, ytd, 1y, 5y and all-time look-back windows.
//!
//! Each window anchors on the earliest transaction inside it and compares
//! that transaction's resulting total with the current total. When nothing
//! falls inside a window the earliest transaction overall is used instead,
//! so a short history still yields a figure for every window.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::debug;

use crate::db::Transaction;
use crate::utils::{date_start_utc, format_percentage, Trend};

/// Value reported for a window without a usable anchor
pub const NO_SIGNAL: &str = "0.00";

/// Look-back windows, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Window {
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "ytd")]
    YearToDate,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "all")]
    AllTime,
}

/// All windows in display order
pub const WINDOWS: [Window; 9] = [
    Window::Day,
    Window::FiveDays,
    Window::OneMonth,
    Window::ThreeMonths,
    Window::SixMonths,
    Window::YearToDate,
    Window::OneYear,
    Window::FiveYears,
    Window::AllTime,
];

impl Window {
    pub fn label(&self) -> &'static str {
        match self {
            Window::Day => "24h",
            Window::FiveDays => "5d",
            Window::OneMonth => "1mo",
            Window::ThreeMonths => "3mo",
            Window::SixMonths => "6mo",
            Window::YearToDate => "ytd",
            Window::OneYear => "1y",
            Window::FiveYears => "5y",
            Window::AllTime => "all",
        }
    }

    fn lookback_days(&self) -> Option<i64> {
        match self {
            Window::Day => Some(1),
            Window::FiveDays => Some(5),
            Window::OneMonth => Some(30),
            Window::ThreeMonths => Some(90),
            Window::SixMonths => Some(180),
            Window::OneYear => Some(365),
            Window::FiveYears => Some(1825),
            Window::YearToDate | Window::AllTime => None,
        }
    }

    /// Earliest instant a transaction may fall on to anchor this window.
    /// `None` means the window has no lower bound (all-time) or the bound
    /// could not be represented.
    pub fn lower_bound(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Window::AllTime => None,
            Window::YearToDate => NaiveDate::from_ymd_opt(now.year(), 1, 1).map(date_start_utc),
            _ => self
                .lookback_days()
                .and_then(|days| now.checked_sub_signed(Duration::days(days))),
        }
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Percentage change for one window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowPerformance {
    pub window: Window,
    /// Two-decimal percentage, e.g. "12.50" or "-3.00"
    pub value: String,
}

impl WindowPerformance {
    pub fn trend(&self) -> Trend {
        Trend::classify_str(&self.value)
    }
}

/// Results for every window, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowReport {
    entries: Vec<WindowPerformance>,
}

impl WindowReport {
    pub fn entries(&self) -> &[WindowPerformance] {
        &self.entries
    }

    pub fn get(&self, window: Window) -> &str {
        self.entries
            .iter()
            .find(|e| e.window == window)
            .map(|e| e.value.as_str())
            .unwrap_or(NO_SIGNAL)
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.window.label())
    }
}

// Serialized as an ordered `label -> value` map
impl Serialize for WindowReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.window.label(), &entry.value)?;
        }
        map.end()
    }
}

/// Percentage change from `old` to `current`.
///
/// Returns `None` when `old` is zero or the arithmetic overflows; callers
/// report those as no signal.
pub fn percentage_change(old: Decimal, current: Decimal) -> Option<Decimal> {
    current
        .checked_sub(old)?
        .checked_div(old)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

fn find_anchor<'a>(
    window: Window,
    transactions: &'a [Transaction],
    now: DateTime<Utc>,
) -> Option<&'a Transaction> {
    let earliest = transactions.first()?;

    let Some(bound) = window.lower_bound(now) else {
        return Some(earliest);
    };

    let anchor = transactions.iter().find(|t| {
        t.effective_date
            .map(date_start_utc)
            .is_some_and(|at| at >= bound)
    });

    Some(anchor.unwrap_or_else(|| {
        debug!(
            "No transaction inside {} window, anchoring on earliest",
            window
        );
        earliest
    }))
}

/// Compute window performance against the wall clock.
///
/// `transactions` must already be ordered by effective date.
pub fn compute_window_performance(
    transactions: &[Transaction],
    current_total: Decimal,
) -> WindowReport {
    compute_window_performance_at(transactions, current_total, Utc::now())
}

/// Compute window performance relative to `now`.
pub fn compute_window_performance_at(
    transactions: &[Transaction],
    current_total: Decimal,
    now: DateTime<Utc>,
) -> WindowReport {
    let entries = WINDOWS
        .iter()
        .map(|&window| {
            let value = find_anchor(window, transactions, now)
                .and_then(|anchor| percentage_change(anchor.resulting_total, current_total))
                .map(format_percentage)
                .unwrap_or_else(|| NO_SIGNAL.to_string());
            WindowPerformance { window, value }
        })
        .collect();

    WindowReport { entries }
}
