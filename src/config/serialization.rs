//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::{rotation_name, Config};

/// Quote a string as a TOML basic string
fn quoted(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

/// `key = "value"` when set, a commented example otherwise
fn optional_line(key: &str, value: Option<&str>, example: &str) -> String {
    match value {
        Some(v) => format!("{} = {}\n", key, quoted(v)),
        None => format!("# {} = {}\n", key, quoted(example)),
    }
}

impl Config {
    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        let timeout = match self.store.request_timeout_secs {
            Some(secs) => format!("request_timeout_secs = {}\n", secs),
            None => "# request_timeout_secs = 10  # default: wait indefinitely\n".to_string(),
        };

        format!(
            r#"# treinos configuration

# Theme: dark, light, terminal
theme = {theme}

# Use theme's background color (true) or terminal's default (false)
use_theme_background = {use_bg}

# Remote record store (PostgREST / Supabase)
# TREINOS_STORE_URL, TREINOS_API_KEY and TREINOS_TABLE override these
[store]
{url}{api_key}table = {table}
{timeout}
# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# File logging (in addition to TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            theme = quoted(&self.theme),
            use_bg = self.use_theme_background,
            url = optional_line(
                "url",
                self.store.url.as_deref(),
                "https://your-project.supabase.co"
            ),
            api_key = optional_line("api_key", self.store.api_key.as_deref(), "your-anon-key"),
            table = quoted(&self.store.table),
            timeout = timeout,
            log_level = quoted(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quoted(&self.logging.file_dir.display().to_string()),
            log_file_rotation = rotation_name(&self.logging.file_rotation),
            log_file_prefix = quoted(&self.logging.file_prefix),
        )
    }
}
