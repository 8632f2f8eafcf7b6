//! `[logging]` section
//!
//! Deserialized straight into [`LoggingConfig`]; missing keys keep their
//! defaults. The rotation key maps onto `tracing_appender`'s own
//! [`Rotation`], so nothing downstream has to translate it again.

use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use tracing_appender::rolling::Rotation;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter for the `treinos` target when RUST_LOG is unset
    pub level: String,
    /// Also write JSON lines to `file_dir`
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    #[serde(deserialize_with = "rotation_from_str")]
    pub file_rotation: Rotation,
    /// File names come out as `<prefix>.<date>.jsonl`
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_rotation: Rotation::DAILY,
            file_prefix: "treinos".to_string(),
        }
    }
}

/// Name used in the config file; anything unrecognised reads as daily
pub fn parse_rotation(name: &str) -> Rotation {
    match name.to_ascii_lowercase().as_str() {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}

pub fn rotation_name(rotation: &Rotation) -> &'static str {
    if *rotation == Rotation::HOURLY {
        "hourly"
    } else if *rotation == Rotation::NEVER {
        "never"
    } else {
        "daily"
    }
}

fn rotation_from_str<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rotation, D::Error> {
    let name = String::deserialize(deserializer)?;
    Ok(parse_rotation(&name))
}
