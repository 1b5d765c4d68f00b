//! Output formatting module for CLI display
//!
//! Keeps presentation apart from the calculations: everything here takes
//! already-computed reports and renders terminal text.

use colored::{ColoredString, Colorize};
use rust_decimal::Decimal;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use fundtrack::config::Settings;
use fundtrack::db::{AumSnapshot, Transaction};
use fundtrack::reports::{HistoryPoint, TwrSeries, WindowReport};
use fundtrack::utils::{format_money, format_percentage, Trend, DATE_FORMAT};

fn paint(text: String, trend: Trend) -> ColoredString {
    match trend {
        Trend::Gain => text.green(),
        Trend::Loss => text.red(),
    }
}

/// "Total: 1500 pts (€ 1,500.00)"
pub fn format_balance(total: Decimal, settings: &Settings) -> String {
    format!(
        "{} {} {} ({})",
        "Total:".bold(),
        total.normalize(),
        settings.points_label,
        format_money(total, &settings.currency_symbol)
    )
}

/// One `label: value%` entry per window, colored by gain/loss
pub fn format_window_report(report: &WindowReport) -> String {
    report
        .entries()
        .iter()
        .map(|e| {
            paint(format!("{}: {}%", e.window, e.value), e.trend()).to_string()
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn format_transactions_table(transactions: &[Transaction], settings: &Settings) -> String {
    #[derive(Tabled)]
    struct TransactionRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Type")]
        kind: String,
        #[tabled(rename = "Amount")]
        amount: String,
        #[tabled(rename = "Total After")]
        resulting_total: String,
    }

    let rows: Vec<TransactionRow> = transactions
        .iter()
        .map(|t| TransactionRow {
            date: t
                .effective_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| "-".to_string()),
            kind: t.kind.as_str().to_uppercase(),
            amount: format_money(t.amount, &settings.currency_symbol),
            resulting_total: format_money(t.resulting_total, &settings.currency_symbol),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    table.modify(Columns::new(2..), Alignment::right());
    table.to_string()
}

pub fn format_snapshots_table(snapshots: &[AumSnapshot], settings: &Settings) -> String {
    #[derive(Tabled)]
    struct SnapshotRow {
        #[tabled(rename = "Recorded At (UTC)")]
        recorded_at: String,
        #[tabled(rename = "AUM")]
        amount: String,
    }

    let rows: Vec<SnapshotRow> = snapshots
        .iter()
        .map(|s| SnapshotRow {
            recorded_at: s
                .recorded_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string()),
            amount: format_money(s.amount, &settings.currency_symbol),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    table.modify(Columns::new(1..), Alignment::right());
    table.to_string()
}

pub fn format_twr_table(series: &TwrSeries) -> String {
    #[derive(Tabled)]
    struct TwrRow {
        #[tabled(rename = "Date")]
        label: String,
        #[tabled(rename = "Cumulative Return")]
        value: String,
    }

    let rows: Vec<TwrRow> = series
        .points()
        .iter()
        .map(|p| TwrRow {
            label: p.label.clone(),
            value: paint(
                format!("{}%", format_percentage(p.value)),
                Trend::classify(p.value),
            )
            .to_string(),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    table.modify(Columns::new(1..), Alignment::right());
    table.to_string()
}

/// Latest TWR value as a one-line summary
pub fn format_twr_summary(series: &TwrSeries) -> String {
    match series.latest() {
        Some(point) => format!(
            "{} {} (as of {})",
            "Time-weighted return:".bold(),
            paint(
                format!("{}%", format_percentage(point.value)),
                Trend::classify(point.value)
            ),
            point.label
        ),
        None => format!(
            "{} {} (needs at least two AUM snapshots)",
            "Time-weighted return:".bold(),
            "0.00%"
        ),
    }
}

/// Fund-points history as `date → total` lines
pub fn format_history(points: &[HistoryPoint], settings: &Settings) -> String {
    points
        .iter()
        .map(|p| {
            format!(
                "  {}  {}",
                p.label,
                format_money(p.total, &settings.currency_symbol)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Message shown when there is nothing to list yet
pub fn format_empty(what: &str, hint: &str) -> String {
    format!(
        "{} No {} recorded\nAdd one using: {} {}\n",
        "ℹ".blue().bold(),
        what,
        "fundtrack".bold(),
        hint
    )
}
