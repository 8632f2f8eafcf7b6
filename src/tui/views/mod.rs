// Views module - screen-level rendering logic
//
// The tracker screen is stacked top to bottom:
// header │ add form (while adding) │ day sections │ logs (toggled) │ status
//
// Help modal and toast are drawn last, on top.

mod help;
mod tracker;

use super::app::App;
use crate::tui::components::{self, logs_panel};
use crate::tui::view_model::ViewTree;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Height of the log panel when shown, borders included
const LOG_PANEL_HEIGHT: u16 = 8;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(
        Style::default()
            .bg(app.theme.background)
            .fg(app.theme.foreground),
    );
    f.render_widget(bg_block, f.area());

    // Immutable snapshot for this frame
    let snapshot = app.session.snapshot();
    let tree = ViewTree::project(&snapshot);

    let mut constraints = vec![Constraint::Length(tracker::HEADER_HEIGHT)];
    if tree.form.is_some() {
        constraints.push(Constraint::Length(tracker::FORM_HEIGHT));
    }
    constraints.push(Constraint::Min(3));
    if app.show_logs {
        constraints.push(Constraint::Length(LOG_PANEL_HEIGHT));
    }
    constraints.push(Constraint::Length(2));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    let mut next = 0;
    let mut take = || {
        let area = chunks[next];
        next += 1;
        area
    };

    tracker::render_header(f, take(), &tree.header, app);
    if let Some(form) = &tree.form {
        tracker::render_form(f, take(), form, app);
    }
    tracker::render_days(f, take(), &tree, app);
    if app.show_logs {
        let entries = app.log_buffer.recent(LOG_PANEL_HEIGHT as usize);
        logs_panel::render(f, take(), &entries, app.log_buffer.len(), &app.theme);
    }
    components::status_bar::render(f, take(), app);

    if app.modal.is_some() {
        help::render(f, app);
    }

    if let Some(ref toast) = app.toast {
        toast.render(f, f.area(), &app.theme);
    }

    // Clear expired toast after render
    app.clear_expired_toast();
}
