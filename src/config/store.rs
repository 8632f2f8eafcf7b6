//! Record store connection settings
//!
//! The URL and key are usually given through the environment so the key
//! stays out of the config file.

use serde::Deserialize;

/// Default remote collection name
pub const DEFAULT_TABLE: &str = "trainings";

/// Store connection configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Project base URL, e.g. https://abcd.supabase.co
    pub url: Option<String>,
    /// Public (anon) API key sent as `apikey` and bearer token
    pub api_key: Option<String>,
    /// Table holding the records
    pub table: String,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout_secs: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            table: DEFAULT_TABLE.to_string(),
            request_timeout_secs: None,
        }
    }
}

/// Store settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileStore {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub table: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl StoreConfig {
    /// Create from file config, with env overrides and defaults
    pub fn from_file(file: Option<FileStore>, env: impl Fn(&str) -> Option<String>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            url: env("TREINOS_STORE_URL").or(file.url),
            api_key: env("TREINOS_API_KEY").or(file.api_key),
            table: env("TREINOS_TABLE")
                .or(file.table)
                .unwrap_or(defaults.table),
            // 0 means "no timeout" so users can switch it off explicitly
            request_timeout_secs: file
                .request_timeout_secs
                .filter(|secs| *secs > 0)
                .or(defaults.request_timeout_secs),
        }
    }
}
