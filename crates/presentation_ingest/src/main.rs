//! Freightgate ingest CLI
//!
//! Runs one ingest event and prints the response as JSON.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use infrastructure::{AppConfig, DatabaseConfig, init_tracing};
use presentation_ingest::{IngestEvent, run_event};
use tokio::io::AsyncReadExt;

/// Freightgate batch ingest
#[derive(Parser)]
#[command(name = "freightgate-ingest")]
#[command(author, version, about = "Upsert a base64 CSV batch of loads", long_about = None)]
struct Cli {
    /// Event JSON file; read from stdin when omitted
    #[arg(short, long)]
    event: Option<PathBuf>,

    /// Database connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

async fn read_event(path: Option<&PathBuf>) -> anyhow::Result<IngestEvent> {
    let raw = match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read event file {}", path.display()))?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("Failed to read event from stdin")?;
            raw
        },
    };

    serde_json::from_str(&raw).context("Event is not valid JSON")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;

    init_tracing(
        &config.server.log_format,
        log_filter_from_verbosity(cli.verbose),
    )?;

    let event = read_event(cli.event.as_ref()).await?;

    // Only an explicit DATABASE_URL is used; the server's default file is not
    let database = cli
        .database_url
        .filter(|url| !url.trim().is_empty())
        .map(|url| DatabaseConfig {
            url,
            ..config.database
        });

    let response = run_event(&event, database.as_ref()).await;
    println!("{}", serde_json::to_string(&response)?);

    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
