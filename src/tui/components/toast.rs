// Transient one-line notices
//
// A toast sits centred on the row just above the status bar and disappears
// on its own. Progress notices ("Salvando…") are short-lived; problems the
// user has to act on stay up a little longer and use the warning color.

use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// Rows taken by the status bar (top border + text)
const STATUS_BAR_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// A gateway call was started
    Progress,
    /// Nothing happened; the user has to fix something first
    Problem,
}

impl ToastKind {
    fn lifetime(self) -> Duration {
        match self {
            Self::Progress => Duration::from_secs(2),
            Self::Problem => Duration::from_secs(3),
        }
    }

    fn marker(self) -> &'static str {
        match self {
            Self::Progress => "›",
            Self::Problem => "!",
        }
    }
}

#[derive(Debug)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    expires_at: Instant,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            expires_at: Instant::now() + kind.lifetime(),
        }
    }

    pub fn progress(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Progress, message)
    }

    pub fn problem(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Problem, message)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    fn text(&self) -> String {
        format!(" {} {} ", self.kind.marker(), self.message)
    }

    /// Row above the status bar, centred, as wide as the text allows
    fn placement(&self, screen: Rect) -> Rect {
        // Display width, not bytes: messages carry accents and ellipses
        let width = (self.text().width() as u16).min(screen.width);
        let x = screen.x + (screen.width - width) / 2;
        let y = screen
            .bottom()
            .saturating_sub(STATUS_BAR_ROWS + 1)
            .max(screen.y);
        Rect::new(x, y, width, 1.min(screen.height))
    }

    pub fn render(&self, f: &mut Frame, screen: Rect, theme: &Theme) {
        let area = self.placement(screen);
        let accent = match self.kind {
            ToastKind::Progress => theme.highlight,
            ToastKind::Problem => theme.warning,
        };

        let line = Line::from(Span::styled(
            self.text(),
            Style::default()
                .fg(theme.selection_fg)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
        ));

        f.render_widget(Clear, area);
        f.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_outlives_progress() {
        let now = Instant::now();
        let progress = Toast::progress("Salvando…");
        let problem = Toast::problem("Escolha o dia");

        assert!(!progress.is_expired_at(now));
        let later = now + Duration::from_millis(2500);
        assert!(progress.is_expired_at(later));
        assert!(!problem.is_expired_at(later));
        assert!(problem.is_expired_at(now + Duration::from_secs(4)));
    }

    #[test]
    fn test_placed_centred_above_status_bar() {
        let toast = Toast::progress("Removendo #3…");
        let area = toast.placement(Rect::new(0, 0, 80, 24));

        // " › Removendo #3… " is 17 cells wide
        assert_eq!(area, Rect::new(31, 21, 17, 1));
    }

    #[test]
    fn test_placement_fits_tiny_screen() {
        let toast = Toast::problem("Nenhum treino selecionado");
        let area = toast.placement(Rect::new(0, 0, 10, 2));

        assert_eq!(area.width, 10);
        assert_eq!(area.x, 0);
        assert_eq!(area.y, 0);
    }
}
