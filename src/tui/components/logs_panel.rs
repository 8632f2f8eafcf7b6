// Logs panel component
//
// Shows the tail of the in-memory log buffer. Gateway failures are only
// logged by the session, so this is where a failed save or delete becomes
// visible in the TUI.

use crate::logging::LogEntry;
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use tracing::Level;

/// Render the most recent entries that fit in `area`
///
/// `total` is the buffer size, shown in the title.
pub fn render(f: &mut Frame, area: Rect, entries: &[LogEntry], total: usize, theme: &Theme) {
    let visible = area.height.saturating_sub(2) as usize;
    let skip = entries.len().saturating_sub(visible);

    let items: Vec<ListItem> = entries
        .iter()
        .skip(skip)
        .map(|entry| {
            let style = Style::default().fg(level_color(entry.level, theme));
            ListItem::new(format_log_entry(entry)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(format!(" Logs ({}) ", total)),
    );

    f.render_widget(list, area);
}

/// Format a single log entry for display
pub fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "{} {:<5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

fn level_color(level: Level, theme: &Theme) -> Color {
    if level == Level::ERROR {
        theme.error
    } else if level == Level::WARN {
        theme.warning
    } else if level == Level::INFO {
        theme.foreground
    } else {
        theme.muted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_format_log_entry() {
        let entry = LogEntry {
            timestamp: Local.with_ymd_and_hms(2025, 10, 6, 9, 5, 3).unwrap(),
            level: Level::WARN,
            message: "Failed to remove training 7: not found".to_string(),
        };
        assert_eq!(
            format_log_entry(&entry),
            "09:05:03 WARN  Failed to remove training 7: not found"
        );
    }
}
