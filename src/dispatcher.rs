//! Command dispatcher that routes internal `Command`s to their handlers.

mod aum;
mod dashboard;
mod performance;
mod transactions;

use anyhow::Result;
use fundtrack::config::Settings;

use crate::commands::Command;

/// What every handler needs besides the command itself
pub struct RunContext {
    pub settings: Settings,
    pub json_output: bool,
}

/// Route a parsed command to its handler
pub async fn dispatch_command(command: Command, ctx: &RunContext) -> Result<()> {
    match command {
        Command::Record { kind, amount, date } => {
            transactions::dispatch_record(kind, amount, date, ctx).await
        }
        Command::TransactionsList => transactions::dispatch_list(ctx).await,
        Command::AumAdd { amount, at } => aum::dispatch_add(amount, at, ctx).await,
        Command::AumList => aum::dispatch_list(ctx).await,
        Command::PerformanceWindows => performance::dispatch_windows(ctx).await,
        Command::PerformanceTwr => performance::dispatch_twr(ctx).await,
        Command::Dashboard { public } => dashboard::dispatch_dashboard(public, ctx).await,
    }
}
