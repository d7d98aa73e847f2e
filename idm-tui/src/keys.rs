//! Keybinding definitions for the console.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextView,
    PrevView,
    MoveUp,
    MoveDown,
    ToggleRow,
    ToggleBulkMenu,
    ToggleBulkCheckbox,
    SelectAll,
    NextPage,
    PrevPage,
    CyclePerPage,
    OpenSearch,
    Refresh,
    NewItem,
    DeleteItem,
    EditItem,
    Revert,
    Save,
    OpenHelp,
    Confirm,
    Cancel,
}

pub fn map_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::OpenHelp),
        KeyCode::Char('/') => Some(Action::OpenSearch),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('n') => Some(Action::NewItem),
        KeyCode::Char('d') => Some(Action::DeleteItem),
        KeyCode::Char('e') => Some(Action::EditItem),
        KeyCode::Char('u') => Some(Action::Revert),
        KeyCode::Char('s') => Some(Action::Save),
        KeyCode::Char('b') => Some(Action::ToggleBulkMenu),
        KeyCode::Char('x') => Some(Action::ToggleBulkCheckbox),
        KeyCode::Char('a') => Some(Action::SelectAll),
        KeyCode::Char(']') => Some(Action::NextPage),
        KeyCode::Char('[') => Some(Action::PrevPage),
        KeyCode::Char('p') => Some(Action::CyclePerPage),
        KeyCode::Char(' ') => Some(Action::ToggleRow),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Tab => Some(Action::NextView),
        KeyCode::BackTab => Some(Action::PrevView),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        _ => None,
    }
}
