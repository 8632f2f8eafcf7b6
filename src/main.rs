// treinos - weekly workout tracker for the terminal
//
// Log which training type you did on which weekday, see counts per type,
// delete entries. Records live in a remote table; the app keeps a cached
// copy and re-fetches it after every change.
//
// Architecture:
// - Store (reqwest): async gateway to the remote table, or in-memory for demo
// - Session: owns view state, runs gateway calls on tasks, applies results
// - TUI (ratatui): projects session state to the screen, routes keys
// - CLI (clap): config management and scripted list/add/remove

mod cli;
mod config;
mod logging;
mod model;
mod session;
mod store;
mod theme;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use logging::{LogBuffer, LogTarget};
use session::Session;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config management never touches the store or logging
    if let Some(Commands::Config(args)) = &cli.command {
        return cli::run_config_command(args, &mut std::io::stdout().lock());
    }

    // First run drops a commented template so the options are discoverable;
    // an unwritable home just means running on defaults
    if let Some(path) = Config::config_path() {
        let _ = Config::write_template_if_missing(&path);
    }
    let config = Config::load()?;

    match cli.command {
        None => run_tui(config).await,
        Some(command) => run_command(command, config).await,
    }
}

/// Interactive mode: logs are captured for the in-app log panel
async fn run_tui(config: Config) -> Result<()> {
    let log_buffer = LogBuffer::new();
    // The guard must be kept alive for the duration of the program to ensure logs flush
    let _file_guard = logging::init(&config.logging, LogTarget::Tui(log_buffer.clone()));

    let store = store::from_config(&config).context("Failed to set up the record store")?;
    tracing::info!(
        "treinos v{} starting ({} store)",
        config::VERSION,
        store.name()
    );

    let (session, store_rx) = Session::with_channel(store);
    tui::run_tui(session, store_rx, log_buffer, &config).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Scripted mode: one store command, logs to stderr
async fn run_command(command: Commands, config: Config) -> Result<()> {
    let _file_guard = logging::init(&config.logging, LogTarget::Stderr);

    let store = store::from_config(&config).context("Failed to set up the record store")?;
    let mut stdout = std::io::stdout().lock();
    cli::run_record_command(command, store, &mut stdout).await
}
