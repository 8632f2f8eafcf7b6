// Command line surface
//
// No subcommand starts the TUI. `list`, `add` and `remove` talk to the
// record store once and print the resulting week; `config` inspects or
// rewrites ~/.config/treinos/config.toml.

use crate::config::{rotation_name, Config, VERSION};
use crate::model::{TrainingId, TrainingRecord, TrainingType, Weekday};
use crate::session::{derived_counts, grouped_by_day, nonzero_counts};
use crate::store::SharedStore;
use crate::theme::Theme;
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

/// treinos - weekly workout tracker
#[derive(Parser)]
#[command(name = "treinos")]
#[command(version = VERSION)]
#[command(about = "Weekly workout tracker for the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Print all trainings grouped by day, with per-type counts
    List,

    /// Log a training
    Add {
        /// Weekday, e.g. "Quarta-feira" or "quarta"
        #[arg(long, value_parser = parse_day)]
        day: Weekday,

        /// Training type, e.g. "Braços" or "bracos"
        #[arg(long = "type", value_parser = parse_type)]
        kind: TrainingType,
    },

    /// Delete a training by id
    Remove {
        /// Record id as shown by `list`
        id: i64,
    },

    /// Inspect or rewrite the config file
    Config(ConfigArgs),
}

/// At most one action per invocation; none prints the usage
#[derive(Args, Debug, Default, PartialEq)]
#[group(multiple = false)]
pub struct ConfigArgs {
    /// Print the effective configuration (env > file > defaults)
    #[arg(long)]
    show: bool,

    /// Print the config file path
    #[arg(long)]
    path: bool,

    /// Overwrite the config file with defaults
    #[arg(long)]
    reset: bool,

    /// Open the config file in $EDITOR
    #[arg(long)]
    edit: bool,

    /// Rewrite the config file in the current layout, keeping its values
    #[arg(long)]
    update: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    Show,
    Path,
    Reset,
    Edit,
    Update,
}

impl ConfigArgs {
    pub fn action(&self) -> Option<ConfigAction> {
        [
            (self.show, ConfigAction::Show),
            (self.path, ConfigAction::Path),
            (self.reset, ConfigAction::Reset),
            (self.edit, ConfigAction::Edit),
            (self.update, ConfigAction::Update),
        ]
        .into_iter()
        .find_map(|(set, action)| set.then_some(action))
    }
}

fn parse_day(s: &str) -> Result<Weekday, String> {
    Weekday::from_alias(s).map_err(|e| e.to_string())
}

fn parse_type(s: &str) -> Result<TrainingType, String> {
    TrainingType::from_alias(s).map_err(|e| e.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Record commands
// ─────────────────────────────────────────────────────────────────────────────

/// Run list/add/remove against the store, writing the result to `out`
///
/// Unlike the TUI, store failures are returned so the process exits non-zero.
pub async fn run_record_command(
    command: Commands,
    store: SharedStore,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::List => {}
        Commands::Add { day, kind } => {
            store
                .insert(day, kind)
                .await
                .with_context(|| format!("Failed to save {} on {}", kind, day))?;
            writeln!(out, "Salvo: {} ({})\n", kind, day)?;
        }
        Commands::Remove { id } => {
            let id = TrainingId(id);
            store
                .delete_by_id(id)
                .await
                .with_context(|| format!("Failed to remove training {}", id))?;
            writeln!(out, "Removido: #{}\n", id)?;
        }
        Commands::Config(_) => bail!("config is not a record command"),
    }

    let records = store
        .list_all()
        .await
        .context("Failed to load trainings")?;
    print_records(&records, out)?;
    Ok(())
}

/// Plain-text rendering of the record list, same grouping as the TUI
pub fn print_records(records: &[TrainingRecord], out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Total de treinos: {}", records.len())?;

    let counts = nonzero_counts(&derived_counts(records));
    if !counts.is_empty() {
        let summary: Vec<String> = counts
            .iter()
            .map(|(kind, count)| format!("{} {}", kind, count))
            .collect();
        writeln!(out, "{}", summary.join(" · "))?;
    }

    for group in grouped_by_day(records)
        .into_iter()
        .filter(|group| !group.is_empty())
    {
        writeln!(out, "\n{}", group.day)?;
        for record in group.records {
            writeln!(
                out,
                "  #{:<5} {:<8} {}",
                record.id.0,
                record.kind.label(),
                record.date
            )?;
        }
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Config command
// ─────────────────────────────────────────────────────────────────────────────

const CONFIG_USAGE: &str = "\
Usage: treinos config [--show|--path|--reset|--edit|--update]

  --show    print the effective configuration
  --path    print the config file path
  --reset   overwrite the config file with defaults
  --edit    open the config file in $EDITOR
  --update  rewrite the config file in the current layout, keeping values";

/// Run `treinos config`, reporting to `out`
pub fn run_config_command(args: &ConfigArgs, out: &mut impl Write) -> Result<()> {
    let Some(action) = args.action() else {
        writeln!(out, "{}", CONFIG_USAGE)?;
        return Ok(());
    };

    let path = Config::config_path().context("Could not determine the config path")?;

    match action {
        ConfigAction::Path => writeln!(out, "{}", path.display())?,
        ConfigAction::Show => {
            let source = path.exists().then_some(path.as_path());
            show_config(&Config::load()?, source, out)?;
        }
        ConfigAction::Reset => {
            if path.exists() && !confirm_overwrite(&path)? {
                writeln!(out, "Aborted.")?;
                return Ok(());
            }
            Config::write_template(&path)?;
            writeln!(out, "Config reset to defaults: {}", path.display())?;
        }
        ConfigAction::Edit => {
            if Config::write_template_if_missing(&path)? {
                writeln!(out, "Created {}", path.display())?;
            }
            open_in_editor(&path)?;
        }
        ConfigAction::Update => match update_config(&path)? {
            Some(backup) => writeln!(
                out,
                "Rewrote {} (previous version in {})",
                path.display(),
                backup.display()
            )?,
            None => writeln!(out, "Created {}", path.display())?,
        },
    }

    Ok(())
}

/// Keep the first few characters of a secret
fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{}…", visible)
}

fn show_config(config: &Config, source: Option<&Path>, out: &mut impl Write) -> io::Result<()> {
    let unset = || "(not set)".to_string();
    let store = &config.store;
    let logging = &config.logging;

    writeln!(out, "# Effective configuration (env > file > defaults)")?;
    match source {
        Some(path) => writeln!(out, "# Source: {}", path.display())?,
        None => writeln!(out, "# Source: defaults (no config file)")?,
    }
    writeln!(out)?;
    writeln!(out, "theme = {:?}  # {}", config.theme, Theme::NAMES.join(", "))?;
    writeln!(out, "use_theme_background = {}", config.use_theme_background)?;
    writeln!(out, "demo_mode = {}", config.demo_mode)?;

    writeln!(out, "\n[store]")?;
    writeln!(out, "url = {}", store.url.as_ref().map_or_else(unset, |u| format!("{:?}", u)))?;
    writeln!(out, "api_key = {}", store.api_key.as_deref().map_or_else(unset, mask))?;
    writeln!(out, "table = {:?}", store.table)?;
    match store.request_timeout_secs {
        Some(secs) => writeln!(out, "request_timeout_secs = {}", secs)?,
        None => writeln!(out, "request_timeout_secs = (none)")?,
    }

    writeln!(out, "\n[logging]")?;
    writeln!(out, "level = {:?}", logging.level)?;
    writeln!(out, "file_enabled = {}", logging.file_enabled)?;
    writeln!(out, "file_dir = {:?}", logging.file_dir.display().to_string())?;
    writeln!(out, "file_rotation = {:?}", rotation_name(&logging.file_rotation))?;
    Ok(())
}

/// Ask on stderr before clobbering an existing file
fn confirm_overwrite(path: &Path) -> Result<bool> {
    eprint!("{} already exists. Overwrite? [y/N] ", path.display());
    io::stderr().flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read the answer")?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn open_in_editor(path: &Path) -> Result<()> {
    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            let fallback = if cfg!(windows) { "notepad" } else { "nano" };
            fallback.to_string()
        });

    let status = Command::new(&editor)
        .arg(path)
        .status()
        .with_context(|| format!("Failed to launch '{}' (set $EDITOR to your editor)", editor))?;
    if !status.success() {
        bail!("{} exited with {}", editor, status);
    }
    Ok(())
}

/// Rewrite `path` in the current template layout, keeping the values it holds
///
/// Returns the backup of the previous file, or `None` when there was no
/// file and a fresh template was written instead. A file that does not parse
/// is left untouched.
fn update_config(path: &Path) -> Result<Option<PathBuf>> {
    if Config::write_template_if_missing(path)? {
        return Ok(None);
    }

    let updated = Config::load_file_only(path)?.to_toml();

    let backup = path.with_extension("toml.bak");
    fs::copy(path, &backup)
        .with_context(|| format!("Failed to back up {} to {}", path.display(), backup.display()))?;
    fs::write(path, updated).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(Some(backup))
}
