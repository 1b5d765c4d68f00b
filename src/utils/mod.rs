//! Date and number coercion helpers shared by the store, the engines and
//! the formatters.
//!
//! Every parser here returns `Option` rather than an error: an unparseable
//! date or timestamp is treated as absent by the performance engines.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Date format used for transaction effective dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a transaction effective date (`YYYY-MM-DD`).
///
/// # Examples
/// ```
/// use fundtrack::utils::parse_effective_date;
///
/// assert!(parse_effective_date("2025-03-14").is_some());
/// assert!(parse_effective_date(" 2025-03-14 ").is_some());
/// assert!(parse_effective_date("14/03/2025").is_none());
/// assert!(parse_effective_date("").is_none());
/// ```
pub fn parse_effective_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Convert a stored epoch-seconds value into a UTC timestamp.
pub fn timestamp_from_epoch(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

/// Instant at which a calendar date starts, in UTC.
///
/// Transaction dates carry no time of day, so they are compared against
/// snapshot timestamps and look-back bounds as UTC midnight.
pub fn date_start_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Chart label for a timestamp: its calendar date in the local timezone.
pub fn date_label(at: DateTime<Utc>) -> String {
    at.with_timezone(&chrono::Local)
        .format(DATE_FORMAT)
        .to_string()
}

/// Round to two decimals, half away from zero, with no negative zero.
pub fn round_percentage(value: Decimal) -> Decimal {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

/// Format a percentage with exactly two decimal digits: "12.50", "-3.00".
///
/// # Examples
/// ```
/// use fundtrack::utils::format_percentage;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_percentage(dec!(12.5)), "12.50");
/// assert_eq!(format_percentage(dec!(-0.001)), "0.00");
/// assert_eq!(format_percentage(dec!(33.335)), "33.34");
/// ```
pub fn format_percentage(value: Decimal) -> String {
    format!("{:.2}", round_percentage(value))
}

/// Format a money amount with a currency symbol prefix: "€ 1,234.50".
///
/// # Examples
/// ```
/// use fundtrack::utils::format_money;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_money(dec!(1234.5), "€"), "€ 1,234.50");
/// assert_eq!(format_money(dec!(-500), "€"), "€ -500.00");
/// ```
pub fn format_money(value: Decimal, symbol: &str) -> String {
    let is_negative = value < Decimal::ZERO;
    let formatted = format!(
        "{:.2}",
        value
            .abs()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    );
    let (integer_part, decimal_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    // Thousands separators on the integer part
    let with_separators: String = integer_part
        .chars()
        .rev()
        .enumerate()
        .flat_map(|(i, c)| {
            if i > 0 && i % 3 == 0 {
                vec![',', c]
            } else {
                vec![c]
            }
        })
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    let sign = if is_negative { "-" } else { "" };
    format!("{} {}{}.{}", symbol, sign, with_separators, decimal_part)
}

/// Visual gain/loss classification of a percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Gain,
    Loss,
}

impl Trend {
    /// Values at or above zero are gains.
    pub fn classify(value: Decimal) -> Self {
        if value >= Decimal::ZERO {
            Trend::Gain
        } else {
            Trend::Loss
        }
    }

    /// Classify an already-formatted percentage string; unparseable text
    /// counts as zero.
    pub fn classify_str(value: &str) -> Self {
        Self::classify(value.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_effective_date() {
        let d = parse_effective_date("2024-02-29").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2024, 2, 29));
        assert!(parse_effective_date("2023-02-29").is_none());
        assert!(parse_effective_date("2024-2-3x").is_none());
    }

    #[test]
    fn test_timestamp_from_epoch() {
        let ts = timestamp_from_epoch(86_400).unwrap();
        assert_eq!(ts.date_naive(), NaiveDate::from_ymd_opt(1970, 1, 2).unwrap());
        assert!(timestamp_from_epoch(i64::MAX).is_none());
    }

    #[test]
    fn test_date_start_utc_is_midnight() {
        let ts = date_start_utc(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (0, 0, 0));
        assert_eq!(ts.day(), 1);
    }

    #[test]
    fn test_format_percentage_two_decimals() {
        assert_eq!(format_percentage(dec!(0)), "0.00");
        assert_eq!(format_percentage(dec!(20)), "20.00");
        assert_eq!(format_percentage(dec!(-12.345)), "-12.35");
        assert_eq!(format_percentage(dec!(99.994)), "99.99");
        assert_eq!(format_percentage(dec!(-0.004)), "0.00");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec!(0), "€"), "€ 0.00");
        assert_eq!(format_money(dec!(999.99), "€"), "€ 999.99");
        assert_eq!(format_money(dec!(1000000), "$"), "$ 1,000,000.00");
        assert_eq!(format_money(dec!(-1234.567), "€"), "€ -1,234.57");
    }

    #[test]
    fn test_trend_classification() {
        assert_eq!(Trend::classify(dec!(0)), Trend::Gain);
        assert_eq!(Trend::classify(dec!(0.01)), Trend::Gain);
        assert_eq!(Trend::classify(dec!(-0.01)), Trend::Loss);
        assert_eq!(Trend::classify_str("-3.20"), Trend::Loss);
        assert_eq!(Trend::classify_str("0.00"), Trend::Gain);
        assert_eq!(Trend::classify_str("garbage"), Trend::Gain);
    }
}
