// Status bar component
//
// Bottom line: spinner while loading, backend name, key hints and uptime.
// Narrow terminals get the short hint set.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Below this width only the essential hints fit
const WIDE_STATUS: u16 = 90;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let adding = app.session.state().is_adding_mode;

    let hints = match (adding, area.width >= WIDE_STATUS) {
        (true, true) => "←/→ dia │ ↑/↓ tipo │ Enter salvar │ Esc cancelar",
        (true, false) => "←→ dia ↑↓ tipo ⏎ salvar",
        (false, true) => "a adicionar │ d remover │ r recarregar │ L logs │ ? ajuda │ q sair",
        (false, false) => "a + │ d − │ r ⟳ │ ? │ q",
    };

    let activity = match app.spinner() {
        Some(frame) => format!(" {} ", frame),
        None => " ● ".to_string(),
    };

    let problems = app.log_buffer.problem_count();
    let problems = if problems > 0 {
        Span::styled(format!(" ⚠ {} ", problems), Style::default().fg(theme.warning))
    } else {
        Span::raw("")
    };

    let line = Line::from(vec![
        Span::styled(activity, Style::default().fg(theme.highlight)),
        Span::styled(app.session.store_name(), Style::default().fg(theme.muted)),
        problems,
        Span::raw(" │ "),
        Span::styled(hints, Style::default().fg(theme.status_bar)),
        Span::raw(" │ "),
        Span::styled(app.uptime(), Style::default().fg(theme.muted)),
    ]);

    let status = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(theme.border)),
    );

    f.render_widget(status, area);
}
