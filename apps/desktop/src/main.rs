mod commands;
mod config;
mod sample;

use std::{fs, path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use client_core::{
    Board, FilterStore, InMemoryPointsApi, PointsApi, PointsStore, Screen, Seed,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::commands::{Command, HELP};

#[derive(Parser, Debug)]
#[command(name = "trip-board", about = "Interactive trip-point board")]
struct Args {
    /// Settings file; defaults to ./trip-board.toml when present.
    #[arg(long)]
    settings: Option<PathBuf>,
    /// JSON seed with `points`, `destinations` and `offers`; a built-in trip is used otherwise.
    #[arg(long)]
    seed: Option<PathBuf>,
    /// Reject this many persistence calls up front.
    #[arg(long, default_value_t = 0)]
    fail_next: usize,
    /// Simulated persistence latency.
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = config::load_settings(args.settings.as_deref())?;
    let seed = match &args.seed {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read seed file '{}'", path.display()))?;
            serde_json::from_str::<Seed>(&raw)
                .with_context(|| format!("invalid seed file '{}'", path.display()))?
        }
        None => sample::sample_seed(Utc::now()),
    };
    info!(
        points = seed.points.len(),
        abort_feedback_ms = settings.abort_feedback_ms,
        "starting trip board"
    );

    let api = Arc::new(
        InMemoryPointsApi::new(seed).with_latency(Duration::from_millis(args.latency_ms)),
    );
    api.fail_next(args.fail_next);
    let service: Arc<dyn PointsApi> = api.clone();
    let mut board = Board::new(
        Arc::new(PointsStore::new()),
        Arc::new(FilterStore::new()),
        service,
        Screen::new(),
        settings,
    );

    board.initialize();
    print_screen(board.renderer());
    board.load().await?;
    print_screen(board.renderer());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                eprintln!("error: {err:#}");
                continue;
            }
        };
        if command == Command::Help {
            println!("{HELP}");
            continue;
        }
        match commands::execute(&mut board, &api, command) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => {
                warn!(error = %err, "command rejected");
                eprintln!("error: {err:#}");
                continue;
            }
        }

        let mut shown = board.renderer().to_text();
        print_text(&shown);
        while board.next_event().await? {
            let current = board.renderer().to_text();
            if current != shown {
                print_text(&current);
                shown = current;
            }
        }
    }

    info!("trip board closed");
    Ok(())
}

fn print_screen(screen: &Screen) {
    print_text(&screen.to_text());
}

fn print_text(text: &str) {
    println!("{text}----");
}
