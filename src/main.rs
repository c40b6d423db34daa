use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use awsbreeze::app::AppContext;
use awsbreeze::cli::{commands, Cli, Commands};
use awsbreeze::config::Config;

const DEFAULT_LOG_FILTER: &str = "awsbreeze=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    // The TUI owns the terminal, so logs go to a file unless we are only printing
    let log_to_stderr = matches!(command, Commands::List { .. }) && cli.log.is_none();
    init_tracing(log_to_stderr, cli.log)?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load config")?;
    let config = match &cli.url {
        Some(url) => config.with_feed_url(url)?,
        None => config,
    };

    let ctx = AppContext::new(config.feed.url.clone())?;

    match command {
        Commands::List { days, new } => {
            commands::list_items(&ctx, days, new).await?;
        }
        Commands::Tui => {
            awsbreeze::tui::run(Arc::new(ctx), Arc::new(config)).await?;
        }
    }

    Ok(())
}

fn init_tracing(to_stderr: bool, log_path: Option<PathBuf>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if to_stderr {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
        return Ok(());
    }

    let log_path = match log_path {
        Some(path) => path,
        None => dirs::cache_dir()
            .context("could not find cache directory")?
            .join("awsbreeze")
            .join("awsbreeze.log"),
    };
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}
