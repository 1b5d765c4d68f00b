//! Performance command dispatcher implementation

use anyhow::Result;
use colored::Colorize;

use fundtrack::{db, reports};

use super::RunContext;
use crate::cli::formatters;

pub async fn dispatch_windows(ctx: &RunContext) -> Result<()> {
    let data = db::load_fund_data(ctx.settings.db_path.clone()).await?;
    let report = reports::compute_window_performance(&data.transactions, data.total.amount);

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n{} Performance\n", "📈".cyan().bold());
    println!("  {}", formatters::format_window_report(&report));
    if data.transactions.is_empty() {
        println!("\n  No transactions yet: every window reads 0.00%");
    }
    Ok(())
}

pub async fn dispatch_twr(ctx: &RunContext) -> Result<()> {
    let data = db::load_fund_data(ctx.settings.db_path.clone()).await?;
    let series = reports::compute_twr_series(&data.snapshots, &data.transactions);

    if ctx.json_output {
        let payload = serde_json::json!({
            "labels": series.labels(),
            "values": series.values(),
            "latest": series.latest().map(|p| p.value),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("\n{} Time-Weighted Return\n", "📈".cyan().bold());
    if !series.is_empty() {
        println!("{}\n", formatters::format_twr_table(&series));
    }
    println!("  {}", formatters::format_twr_summary(&series));
    Ok(())
}
