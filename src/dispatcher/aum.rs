use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use rust_decimal::Decimal;

use fundtrack::db;
use fundtrack::utils::format_money;

use super::RunContext;
use crate::cli::formatters;

pub async fn dispatch_add(
    amount: Decimal,
    at: Option<DateTime<Utc>>,
    ctx: &RunContext,
) -> Result<()> {
    let path = ctx.settings.db_path.clone();
    let snapshot = tokio::task::spawn_blocking(move || {
        db::init_database(&path)?;
        let conn = db::open_db(&path)?;
        match at {
            Some(at) => db::insert_aum_snapshot_at(&conn, amount, at),
            None => db::insert_aum_snapshot(&conn, amount),
        }
    })
    .await
    .context("AUM writer task failed")??;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!(
        "\n{} AUM {} recorded",
        "✓".green().bold(),
        format_money(snapshot.amount, &ctx.settings.currency_symbol).cyan()
    );
    Ok(())
}

pub async fn dispatch_list(ctx: &RunContext) -> Result<()> {
    let data = db::load_fund_data(ctx.settings.db_path.clone()).await?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&data.snapshots)?);
        return Ok(());
    }

    if data.snapshots.is_empty() {
        print!(
            "{}",
            formatters::format_empty("AUM snapshots", "aum add <amount>")
        );
        return Ok(());
    }

    println!("\n{} AUM Snapshots\n", "🏦".cyan().bold());
    println!(
        "{}",
        formatters::format_snapshots_table(&data.snapshots, &ctx.settings)
    );
    Ok(())
}
