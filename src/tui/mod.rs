// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, store completions)
// - Routing keys to session operations

pub mod app;
pub mod components;
pub mod modal;
pub mod view_model;
pub mod views;

use crate::config::Config;
use crate::logging::LogBuffer;
use crate::session::{Session, StoreEvent};
use crate::theme::Theme;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::ModalAction;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, starts the initial fetch, runs the event loop and
/// restores the terminal when done, even if the loop failed.
pub async fn run_tui(
    session: Session,
    mut store_rx: mpsc::Receiver<StoreEvent>,
    log_buffer: LogBuffer,
    config: &Config,
) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let theme = Theme::by_name_with_background(&config.theme, config.use_theme_background);
    let mut app = App::new(session, log_buffer, theme);
    app.session.initialize();

    let result = run_event_loop(&mut terminal, &mut app, &mut store_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with `tokio::select!`:
/// 1. Keyboard input
/// 2. Timer ticks (spinner, toast expiry)
/// 3. Store completions, applied to the session
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store_rx: &mut mpsc::Receiver<StoreEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            Some(store_event) = store_rx.recv() => {
                app.apply(store_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → Add form → Global
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+C always quits, raw mode swallows SIGINT
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        app.should_quit = true;
        return;
    }

    if handle_modal_input(app, key_event.code) {
        return;
    }

    if app.session.state().is_adding_mode && handle_form_keys(app, key_event.code) {
        return;
    }

    handle_global_keys(app, key_event.code);
}

/// Handle modal input - returns true if modal absorbed the input
fn handle_modal_input(app: &mut App, key: KeyCode) -> bool {
    let Some(ref mut modal) = app.modal else {
        return false;
    };

    match modal.handle_input(key) {
        ModalAction::None => {}
        ModalAction::Close => app.modal = None,
        ModalAction::Quit => app.should_quit = true,
    }

    true
}

/// Keys the add form owns while it is open - returns true if handled
fn handle_form_keys(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Esc => app.cancel_add(),
        KeyCode::Left | KeyCode::Char('h') => app.cycle_day(false),
        KeyCode::Right | KeyCode::Char('l') => app.cycle_day(true),
        KeyCode::Up | KeyCode::Char('k') => app.cycle_type(false),
        KeyCode::Down | KeyCode::Char('j') => app.cycle_type(true),
        KeyCode::Enter => app.submit(),
        _ => return false,
    }
    true
}

/// Keys that work outside the form and modals
fn handle_global_keys(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('?') => app.open_help(),
        KeyCode::Char('a') | KeyCode::Char('+') => app.begin_add(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('L') => app.toggle_logs(),
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TrainingId, TrainingRecord, TrainingType, Weekday};
    use crate::session::Session;
    use crate::store::{MemoryStore, StoreCall};
    use crate::tui::components::toast::ToastKind;
    use std::sync::Arc;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    async fn settle(app: &mut App, rx: &mut mpsc::Receiver<StoreEvent>) {
        while app.session.pending() > 0 {
            let event = rx.recv().await.expect("store event");
            app.apply(event);
        }
    }

    async fn loaded_app(
        records: Vec<TrainingRecord>,
    ) -> (App, mpsc::Receiver<StoreEvent>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::with_records(records).with_date("06/10/2025"));
        let (session, mut rx) = Session::with_channel(store.clone());
        let mut app = App::new(session, LogBuffer::new(), Theme::default());
        app.session.initialize();
        settle(&mut app, &mut rx).await;
        (app, rx, store)
    }

    fn record(id: i64, day: Weekday, kind: TrainingType) -> TrainingRecord {
        TrainingRecord {
            id: TrainingId(id),
            day,
            kind,
            date: "01/10/2025".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_flow_from_keys() {
        let (mut app, mut rx, store) = loaded_app(vec![]).await;

        press(&mut app, KeyCode::Char('a'));
        assert!(app.session.state().is_adding_mode);

        // Right from nothing starts on Sunday, Down from nothing on Peito
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        settle(&mut app, &mut rx).await;

        assert!(store
            .calls()
            .contains(&StoreCall::Insert(Weekday::Segunda, TrainingType::Peito)));
        let state = app.session.state();
        assert_eq!(state.records.len(), 1);
        assert!(!state.is_adding_mode);
        assert_eq!(state.selected_day, None);
    }

    #[tokio::test]
    async fn test_spinner_runs_while_insert_is_in_flight() {
        let (mut app, mut rx, _store) = loaded_app(vec![]).await;
        assert_eq!(app.spinner(), None);

        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        // Only the insert is running, no fetch yet
        assert!(!app.session.state().is_loading);
        assert!(app.spinner().is_some());

        settle(&mut app, &mut rx).await;
        assert_eq!(app.spinner(), None);
    }

    #[tokio::test]
    async fn test_enter_with_incomplete_form_only_toasts() {
        let (mut app, mut rx, store) = loaded_app(vec![]).await;

        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Enter);
        settle(&mut app, &mut rx).await;

        assert_eq!(app.session.state().selected_day, Some(Weekday::Sabado));
        assert!(!store
            .calls()
            .iter()
            .any(|call| matches!(call, StoreCall::Insert(..))));
        let toast = app.toast.as_ref().expect("toast");
        assert_eq!(toast.kind, ToastKind::Problem);
        assert!(app.session.state().is_adding_mode);
    }

    #[tokio::test]
    async fn test_esc_closes_form_keeping_selection() {
        let (mut app, _rx, _store) = loaded_app(vec![]).await;

        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Esc);

        let state = app.session.state();
        assert!(!state.is_adding_mode);
        assert_eq!(state.selected_type, Some(TrainingType::Cardio));
    }

    #[tokio::test]
    async fn test_delete_removes_record_under_cursor() {
        let (mut app, mut rx, store) = loaded_app(vec![
            record(3, Weekday::Segunda, TrainingType::Cardio),
            record(2, Weekday::Domingo, TrainingType::Peito),
        ])
        .await;

        // Display order is Domingo first, so the second row is #3
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_record(), Some(TrainingId(3)));

        press(&mut app, KeyCode::Char('d'));
        settle(&mut app, &mut rx).await;

        assert!(store.calls().contains(&StoreCall::Delete(TrainingId(3))));
        let ids: Vec<_> = app.session.state().records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![TrainingId(2)]);
        assert_eq!(app.cursor, 0);
    }

    #[tokio::test]
    async fn test_delete_with_no_records_issues_no_call() {
        let (mut app, mut rx, store) = loaded_app(vec![]).await;

        press(&mut app, KeyCode::Delete);
        settle(&mut app, &mut rx).await;

        assert_eq!(store.calls(), vec![StoreCall::ListAll]);
    }

    #[tokio::test]
    async fn test_help_modal_absorbs_keys() {
        let (mut app, _rx, _store) = loaded_app(vec![]).await;

        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Char('a'));
        assert!(app.modal.is_some());
        assert!(!app.session.state().is_adding_mode);

        press(&mut app, KeyCode::Esc);
        assert!(app.modal.is_none());
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_reload_and_log_toggle() {
        let (mut app, mut rx, store) = loaded_app(vec![]).await;

        press(&mut app, KeyCode::Char('r'));
        assert!(app.session.state().is_loading);
        settle(&mut app, &mut rx).await;
        assert_eq!(store.calls(), vec![StoreCall::ListAll, StoreCall::ListAll]);

        press(&mut app, KeyCode::Char('L'));
        assert!(app.show_logs);
    }
}
