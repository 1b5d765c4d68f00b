use anyhow::Result;
use colored::Colorize;
use tracing::info;

use fundtrack::{db, reports};

use super::RunContext;
use crate::cli::formatters;

/// Show total, window performance, fund-points history and the latest TWR.
/// The public view leaves out the transaction list.
pub async fn dispatch_dashboard(public: bool, ctx: &RunContext) -> Result<()> {
    info!("Loading {} dashboard", if public { "public" } else { "full" });

    let data = db::load_fund_data(ctx.settings.db_path.clone()).await?;
    let windows = reports::compute_window_performance(&data.transactions, data.total.amount);
    let history = reports::fund_points(&data.transactions);
    let twr = reports::compute_twr_series(&data.snapshots, &data.transactions);

    if ctx.json_output {
        let mut payload = serde_json::json!({
            "total": data.total.amount,
            "last_updated": data.total.last_updated,
            "performance": windows,
            "history": history,
            "twr": {
                "labels": twr.labels(),
                "values": twr.values(),
            },
        });
        if !public {
            payload["transactions"] = serde_json::to_value(&data.transactions)?;
        }
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let title = if public { "Fund (public)" } else { "Fund Dashboard" };
    println!("\n{} {}\n", "📊".cyan().bold(), title);
    println!("  {}", formatters::format_balance(data.total.amount, &ctx.settings));
    println!("\n  {}", formatters::format_window_report(&windows));
    println!("\n  {}", formatters::format_twr_summary(&twr));

    if !history.is_empty() {
        println!("\n{}", "Fund points".bold());
        println!("{}", formatters::format_history(&history, &ctx.settings));
    }

    if !public && !data.transactions.is_empty() {
        println!();
        println!(
            "{}",
            formatters::format_transactions_table(&data.transactions, &ctx.settings)
        );
    }
    Ok(())
}
