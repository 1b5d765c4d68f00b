mod cli;
mod commands;
mod dispatcher;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use dispatcher::RunContext;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so --json output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let settings = fundtrack::config::load(cli.db.clone())?;
    tracing::debug!("Using database {:?}", settings.db_path);

    let command = cli::runner::to_internal_command(&cli.command)?;
    let ctx = RunContext {
        settings,
        json_output: cli.json,
    };

    dispatcher::dispatch_command(command, &ctx).await
}
