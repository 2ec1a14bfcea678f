//! json-join: fetch messages and favorites together, print them once both arrive.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌────────────────────────────────────────────┐
//!    trigger (startup    │  board::MessageBoard                       │
//!    or --watch tick) ──▶│    join::Joiner (cancels previous join)    │
//!                        │      ├─ leg 0: fetch messages.json ────────┼──▶ upstream
//!                        │      └─ leg 1: fetch favorites.json ───────┼──▶ upstream
//!                        │    latch: both settled → one delivery      │
//!                        └──────────────────────┬─────────────────────┘
//!                                               ▼
//!                                 render::render(&Snapshot) → stdout
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;

use json_join::board::MessageBoard;
use json_join::config::{self, JoinConfig};
use json_join::domain::Snapshot;
use json_join::lifecycle::{signals, Shutdown};
use json_join::observability::logging;
use json_join::render;

#[derive(Parser)]
#[command(name = "json-join")]
#[command(about = "Fetch two JSON resources concurrently and print them together", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override sources.messages_url
    #[arg(long)]
    messages_url: Option<String>,

    /// Override sources.favorites_url
    #[arg(long)]
    favorites_url: Option<String>,

    /// Re-fetch every N seconds until interrupted
    #[arg(short, long, value_name = "SECS")]
    watch: Option<u64>,

    /// Override observability.log_level
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => JoinConfig::default(),
    };
    if let Some(url) = cli.messages_url {
        config.sources.messages_url = url;
    }
    if let Some(url) = cli.favorites_url {
        config.sources.favorites_url = url;
    }
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }

    logging::init(&config.observability.log_level);
    tracing::info!("json-join v{} starting", env!("CARGO_PKG_VERSION"));

    let board = MessageBoard::from_config(&config)?;
    tracing::info!(
        messages_url = %board.sources().messages,
        favorites_url = %board.sources().favorites,
        timeout_ms = config.fetch.timeout_ms,
        retries = config.fetch.retries,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    match cli.watch {
        Some(secs) => watch(board, Duration::from_secs(secs.max(1)), &shutdown).await,
        None => {
            let mut stop = shutdown.subscribe();
            tokio::select! {
                snapshot = board.load() => {
                    if let Some(snapshot) = snapshot {
                        print!("{}", render::render(&snapshot));
                    }
                }
                _ = stop.recv() => {
                    board.cancel();
                }
            }
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Refresh on every tick. A tick that arrives while a join is still in
/// flight supersedes it; only the newest snapshot is printed.
async fn watch(board: MessageBoard, period: Duration, shutdown: &Shutdown) {
    let (tx, mut rx) = mpsc::unbounded_channel::<Snapshot>();
    let mut stop = shutdown.subscribe();
    let mut ticker = tokio::time::interval(period);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let join = board.refresh();
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Some(pair) = join.wait().await {
                        let _ = tx.send(Snapshot::from(pair));
                    }
                });
            }
            Some(snapshot) = rx.recv() => {
                print!("{}", render::render(&snapshot));
            }
            _ = stop.recv() => {
                board.cancel();
                break;
            }
        }
    }
}
