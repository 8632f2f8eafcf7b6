//! Tracker settings
//!
//! Each value resolves as: environment variable, then
//! `~/.config/treinos/config.toml`, then the built-in default. `to_toml()`
//! renders the file layout and is the only writer of it.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

mod logging;
mod serialization;
mod store;


pub use logging::{rotation_name, LoggingConfig};
pub use store::{FileStore, StoreConfig};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreConfig,

    /// Use the seeded in-memory store (`TREINOS_DEMO=1`)
    pub demo_mode: bool,

    /// One of `Theme::NAMES`
    pub theme: String,

    /// Paint the palette's background instead of leaving the terminal's
    pub use_theme_background: bool,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            demo_mode: false,
            theme: "dark".to_string(),
            use_theme_background: true,
            logging: LoggingConfig::default(),
        }
    }
}

/// What the file may set; absent keys stay `None` until resolved
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub theme: Option<String>,
    pub use_theme_background: Option<bool>,
    pub store: Option<FileStore>,
    pub logging: Option<LoggingConfig>,
}

impl Config {
    /// ~/.config/treinos/config.toml on every platform
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("treinos").join("config.toml"))
    }

    /// Write the default template to `path`, replacing whatever is there
    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, Self::default().to_toml())
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Write the template only if `path` does not exist yet; true if written
    pub fn write_template_if_missing(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        Self::write_template(path)?;
        Ok(true)
    }

    /// Parse the file at `path`; a missing file reads as empty
    pub(crate) fn read_file(path: &Path) -> Result<FileConfig> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(FileConfig::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("Cannot read {}", path.display()));
            }
        };

        toml::from_str(&contents).with_context(|| {
            format!(
                "Invalid config file {} (fix it, or start over with `treinos config --reset`)",
                path.display()
            )
        })
    }

    /// Load configuration: env > file > defaults
    ///
    /// A config file that exists but does not parse is an error; it never
    /// falls back to defaults.
    pub fn load() -> Result<Self> {
        let file = match Self::config_path() {
            Some(path) => Self::read_file(&path)?,
            None => FileConfig::default(),
        };
        Ok(Self::resolve(file, |key| std::env::var(key).ok()))
    }

    /// Values from `path` alone, so rewriting the file never bakes in env overrides
    pub fn load_file_only(path: &Path) -> Result<Self> {
        Ok(Self::resolve(Self::read_file(path)?, |_: &str| None))
    }

    /// Merge a parsed file with environment lookups
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Demo mode is a per-run switch, never read from the file
        let demo_mode = env("TREINOS_DEMO")
            .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));

        let theme = env("TREINOS_THEME")
            .or(file.theme)
            .unwrap_or(defaults.theme);

        let use_theme_background = file
            .use_theme_background
            .unwrap_or(defaults.use_theme_background);

        Self {
            store: StoreConfig::from_file(file.store, &env),
            demo_mode,
            theme,
            use_theme_background,
            logging: file.logging.unwrap_or_default(),
        }
    }
}
