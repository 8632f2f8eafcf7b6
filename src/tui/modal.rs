// Overlays that take over the keyboard while open
//
// A modal decides what each key means and reports back a ModalAction; the
// key router in tui/mod.rs applies it to App.

use crossterm::event::KeyCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    /// Key swallowed, overlay stays
    None,
    Close,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Key bindings reference
    Help,
}

impl Modal {
    pub fn help() -> Self {
        Modal::Help
    }

    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter => ModalAction::Close,
                KeyCode::Char('q') | KeyCode::Char('Q') => ModalAction::Quit,
                _ => ModalAction::None,
            },
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Modal::Help => " Ajuda ",
        }
    }
}
