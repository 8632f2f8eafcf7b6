// Logging module - tracing setup and in-memory capture for the TUI
//
// In TUI mode, log events are captured in a ring buffer and shown in the
// optional log panel instead of being printed, which would garble the
// alternate screen. Gateway failures only ever surface here.
//
// Precedence for the filter: RUST_LOG env var > config file > "info".

use crate::config::LoggingConfig;
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Entries kept for the log panel; older ones fall off the front
const CAPACITY: usize = 500;

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    /// The event message, followed by any extra fields as `key=value`
    pub message: String,
}

impl LogEntry {
    /// WARN or ERROR
    pub fn is_problem(&self) -> bool {
        self.level <= Level::WARN
    }
}

#[derive(Default)]
struct Ring {
    entries: VecDeque<LogEntry>,
    /// Problems seen since start, including ones already dropped
    problems: usize,
}

/// Shared tail of recent log events, cloned into the layer and the UI
#[derive(Clone, Default)]
pub struct LogBuffer {
    ring: Arc<Mutex<Ring>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Ring> {
        self.ring.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add(&self, entry: LogEntry) {
        let mut ring = self.lock();
        if entry.is_problem() {
            ring.problems += 1;
        }
        if ring.entries.len() == CAPACITY {
            ring.entries.pop_front();
        }
        ring.entries.push_back(entry);
    }

    /// The last `count` entries, oldest first
    pub fn recent(&self, count: usize) -> Vec<LogEntry> {
        let ring = self.lock();
        let skip = ring.entries.len().saturating_sub(count);
        ring.entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Warnings and errors since start, for the status bar
    pub fn problem_count(&self) -> usize {
        self.lock().problems
    }
}

/// Layer that feeds every event into a [`LogBuffer`]
pub struct TuiLogLayer {
    buffer: LogBuffer,
}

impl TuiLogLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<S: Subscriber> Layer<S> for TuiLogLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = FieldCollector::default();
        event.record(&mut fields);

        self.buffer.add(LogEntry {
            timestamp: Local::now(),
            level: *event.metadata().level(),
            message: fields.finish(),
        });
    }
}

/// Flattens an event into one display line
#[derive(Default)]
struct FieldCollector {
    message: String,
    extra: Vec<String>,
}

impl FieldCollector {
    fn finish(self) -> String {
        if self.extra.is_empty() {
            self.message
        } else {
            format!("{} {}", self.message, self.extra.join(" "))
        }
    }
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.extra.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.extra.push(format!("{}={:?}", field.name(), value));
        }
    }
}

/// Where console-facing logs go
pub enum LogTarget {
    /// Captured in memory for the TUI log panel
    Tui(LogBuffer),
    /// Printed to stderr (CLI subcommands)
    Stderr,
}

/// Install the global tracing subscriber
///
/// Returns the file writer guard when file logging is on; keep it alive
/// until exit so buffered lines get flushed.
pub fn init(config: &LoggingConfig, target: LogTarget) -> Option<WorkerGuard> {
    let default_filter = format!("treinos={}", config.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (file_writer, guard) = match open_log_file(config) {
        Some((writer, guard)) => (Some(writer), Some(guard)),
        None => (None, None),
    };

    // File layer uses JSON format for structured log parsing
    let file_layer = file_writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_ansi(false)
    });

    let (tui_layer, stderr_layer) = match target {
        LogTarget::Tui(buffer) => (Some(TuiLogLayer::new(buffer)), None),
        LogTarget::Stderr => (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Rolling non-blocking JSON-lines writer, if file logging is enabled
///
/// A directory that cannot be created only costs the file layer; the
/// subscriber is not up yet, so the warning goes to stderr.
fn open_log_file(
    config: &LoggingConfig,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if !config.file_enabled {
        return None;
    }

    let appender = RollingFileAppender::builder()
        .rotation(config.file_rotation.clone())
        .filename_prefix(&config.file_prefix)
        .filename_suffix("jsonl")
        .build(&config.file_dir);

    match appender {
        Ok(appender) => Some(tracing_appender::non_blocking(appender)),
        Err(e) => {
            eprintln!(
                "Warning: file logging disabled, cannot write to {}: {}",
                config.file_dir.display(),
                e
            );
            None
        }
    }
}
