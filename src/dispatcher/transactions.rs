use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::Colorize;
use rust_decimal::Decimal;
use tracing::info;

use fundtrack::db::{self, TransactionKind};
use fundtrack::utils::format_money;

use super::RunContext;
use crate::cli::formatters;

pub async fn dispatch_record(
    kind: TransactionKind,
    amount: Decimal,
    date: NaiveDate,
    ctx: &RunContext,
) -> Result<()> {
    info!("Recording {} of {} on {}", kind.as_str(), amount, date);

    let path = ctx.settings.db_path.clone();
    let transaction = tokio::task::spawn_blocking(move || {
        db::init_database(&path)?;
        let mut conn = db::open_db(&path)?;
        db::record_transaction(&mut conn, kind, amount, date)
    })
    .await
    .context("Transaction writer task failed")??;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&transaction)?);
        return Ok(());
    }

    let symbol = &ctx.settings.currency_symbol;
    println!(
        "\n{} {} {} ({}) → total: {}",
        "✓".green().bold(),
        kind.as_str().to_uppercase(),
        format_money(amount, symbol),
        date,
        format_money(transaction.resulting_total, symbol).cyan()
    );
    Ok(())
}

pub async fn dispatch_list(ctx: &RunContext) -> Result<()> {
    let data = db::load_fund_data(ctx.settings.db_path.clone()).await?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&data.transactions)?);
        return Ok(());
    }

    if data.transactions.is_empty() {
        print!(
            "{}",
            formatters::format_empty("transactions", "buy <amount> <YYYY-MM-DD>")
        );
        return Ok(());
    }

    println!("\n{} Transactions\n", "📒".cyan().bold());
    println!(
        "{}",
        formatters::format_transactions_table(&data.transactions, &ctx.settings)
    );
    println!("\n{}", formatters::format_balance(data.total.amount, &ctx.settings));
    Ok(())
}
