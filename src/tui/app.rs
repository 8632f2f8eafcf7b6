// TUI application state
//
// App wraps the session with the bits that only matter on screen: the record
// cursor, the help modal, toasts, the log panel toggle and the spinner.
// Session state itself is never touched here except through session
// operations.

use super::components::Toast;
use super::modal::Modal;
use super::view_model::ViewTree;
use crate::logging::LogBuffer;
use crate::model::{require_selection, TrainingId, TrainingType, Weekday};
use crate::session::{Session, StoreEvent};
use crate::theme::Theme;
use std::time::Instant;

/// Spinner frames shown while a fetch is in flight
const SPINNER: [char; 8] = ['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];

/// Main application state for the TUI
pub struct App {
    pub session: Session,

    /// Index into `ViewTree::rows()` of the highlighted record
    pub cursor: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Whether the log panel is shown under the record list
    pub show_logs: bool,

    /// Active modal overlay (None = no modal)
    pub modal: Option<Modal>,

    /// Active toast notification (auto-dismisses)
    pub toast: Option<Toast>,

    /// Log buffer for system logs display
    pub log_buffer: LogBuffer,

    /// Current color theme
    pub theme: Theme,

    /// Animation frame counter, advanced on every tick
    pub animation_frame: usize,

    /// When the app started (for uptime display)
    start_time: Instant,
}

impl App {
    pub fn new(session: Session, log_buffer: LogBuffer, theme: Theme) -> Self {
        Self {
            session,
            cursor: 0,
            should_quit: false,
            show_logs: false,
            modal: None,
            toast: None,
            log_buffer,
            theme,
            animation_frame: 0,
            start_time: Instant::now(),
        }
    }

    /// Project the current session state for this frame
    pub fn view(&self) -> ViewTree {
        ViewTree::project(self.session.state())
    }

    /// Apply a finished store call and keep the cursor on a real row
    pub fn apply(&mut self, event: StoreEvent) {
        self.session.apply(event);
        self.clamp_cursor();
    }

    // ─── Record cursor ───────────────────────────────────────

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let rows = self.view().row_count();
        if self.cursor + 1 < rows {
            self.cursor += 1;
        }
    }

    fn clamp_cursor(&mut self) {
        let rows = self.view().row_count();
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }

    /// Id of the record under the cursor
    pub fn selected_record(&self) -> Option<TrainingId> {
        self.view().row_at(self.cursor).map(|row| row.id)
    }

    // ─── Add form ────────────────────────────────────────────

    pub fn begin_add(&mut self) {
        self.session.begin_add();
    }

    pub fn cancel_add(&mut self) {
        self.session.cancel_add();
    }

    /// Move the day selection; an empty selection starts at either end
    pub fn cycle_day(&mut self, forward: bool) {
        let day = match (self.session.state().selected_day, forward) {
            (Some(day), true) => day.next(),
            (Some(day), false) => day.prev(),
            (None, true) => Weekday::ALL[0],
            (None, false) => Weekday::ALL[Weekday::ALL.len() - 1],
        };
        self.session.select_day(day);
    }

    /// Move the type selection; an empty selection starts at either end
    pub fn cycle_type(&mut self, forward: bool) {
        let kind = match (self.session.state().selected_type, forward) {
            (Some(kind), true) => kind.next(),
            (Some(kind), false) => kind.prev(),
            (None, true) => TrainingType::ALL[0],
            (None, false) => TrainingType::ALL[TrainingType::ALL.len() - 1],
        };
        self.session.select_type(kind);
    }

    /// Submit the form, or explain what is missing
    pub fn submit(&mut self) {
        let state = self.session.state();
        match require_selection(state.selected_day, state.selected_type) {
            Ok((day, kind)) => {
                if self.session.submit() {
                    self.toast = Some(Toast::progress(format!("Salvando {} ({})…", kind, day)));
                }
            }
            Err(e) => self.toast = Some(Toast::problem(e.to_string())),
        }
    }

    // ─── Records ─────────────────────────────────────────────

    pub fn remove_selected(&mut self) {
        match self.selected_record() {
            Some(id) => {
                self.session.remove(id);
                self.toast = Some(Toast::progress(format!("Removendo #{}…", id)));
            }
            None => self.toast = Some(Toast::problem("Nenhum treino selecionado")),
        }
    }

    pub fn reload(&mut self) {
        self.session.reload();
    }

    // ─── Chrome ──────────────────────────────────────────────

    pub fn open_help(&mut self) {
        self.modal = Some(Modal::help());
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    /// Drop the toast once its time is up (called after each frame)
    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    /// Advance animation frame (called on tick)
    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    /// Spinner character for the current tick
    pub fn spinner_frame(&self) -> char {
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    /// Spinner while any gateway call is in flight, inserts and deletes included
    pub fn spinner(&self) -> Option<char> {
        (self.session.pending() > 0).then(|| self.spinner_frame())
    }

    /// Format uptime as HH:MM:SS
    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
