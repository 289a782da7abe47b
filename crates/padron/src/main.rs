//! `padron` — Terminal client for the persona registry.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive data from
//! `padron-core`'s [`Directory`](padron_core::Directory). One screen:
//! the persona roster, with an edit dialog, row marking for bulk
//! deletion, and a global text filter.
//!
//! Logs are written to a file (default `/tmp/padron.log`) to avoid
//! corrupting the terminal UI. A background bridge task forwards
//! directory snapshots into the TUI action loop.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and
//! app launch.

mod action;
mod app;
mod bridge;
mod component;
mod event;
mod roster;
mod sinks;
mod theme;
mod tui;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::mpsc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use padron_api::{PersonaClient, TransportConfig};
use padron_config::load_config;
use padron_core::{Directory, HttpPersonaStore};

use crate::action::Action;
use crate::app::App;
use crate::sinks::{ActionConfirmer, ActionNotifier};

/// Terminal client for managing the persona registry.
#[derive(Parser, Debug)]
#[command(name = "padron", version, about)]
struct Cli {
    /// Base URL of the persona service (e.g., http://localhost:8080)
    #[arg(short = 'u', long, env = "PADRON_URL")]
    url: Option<String>,

    /// Alternate config file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log file path (defaults to /tmp/padron.log)
    #[arg(long, default_value = "/tmp/padron.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that
/// would corrupt the TUI output. Returns a guard that must be held for
/// the lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "padron={log_level},padron_core={log_level},padron_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("padron.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Wire the REST store and the TUI-backed sinks into a [`Directory`].
fn build_directory(
    base_url: &str,
    timeout: Duration,
    action_tx: &mpsc::UnboundedSender<Action>,
) -> Result<Directory> {
    let transport = TransportConfig { timeout };
    let client = PersonaClient::new(base_url, &transport)?;
    let store = HttpPersonaStore::new(client);
    Ok(Directory::new(
        Arc::new(store),
        Arc::new(ActionNotifier::new(action_tx.clone())),
        Arc::new(ActionConfirmer::new(action_tx.clone())),
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    // Priority: CLI flag > config file (which itself layers env vars)
    let config = load_config(cli.config.as_deref())?;
    let base_url = cli.url.unwrap_or(config.api.url);
    let timeout = Duration::from_secs(config.api.timeout);

    info!(url = %base_url, "starting padron");

    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let directory = build_directory(&base_url, timeout, &action_tx)?;

    let mut app = App::new(directory, action_tx, action_rx);
    app.run().await?;

    Ok(())
}
