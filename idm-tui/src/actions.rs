//! Key handling and the backend round-trips it triggers.
//!
//! [`handle_key`] only mutates local state and returns the [`Command`] that
//! needs the backend; [`run_command`] performs it and reports the outcome as
//! an alert.

use crate::forms::AddHostGroupForm;
use crate::keys::{map_key, Action};
use crate::nav::View;
use crate::notifications::NotificationLevel;
use crate::state::{App, Modal};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use idm_select::{MenuInput, MenuItem};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    Quit,
    LoadHostGroups,
    SearchHostGroups,
    AddHostGroup {
        cn: String,
        description: Option<String>,
    },
    DeleteHostGroups {
        keys: Vec<String>,
    },
    LoadIdView,
    SaveIdView,
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> Command {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Command::Quit;
    }
    if app.search_input.is_some() {
        return handle_search_key(app, key);
    }
    if app.modal.is_some() {
        return handle_modal_key(app, key);
    }
    if app.id_view.editing.is_some() {
        handle_edit_key(app, key);
        return Command::None;
    }
    if app.capture.is_active() && handle_menu_key(app, key) {
        return Command::None;
    }
    match map_key(key) {
        Some(action) => handle_action(app, action),
        None => Command::None,
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) -> Command {
    let Some(input) = app.search_input.as_mut() else {
        return Command::None;
    };
    match key.code {
        KeyCode::Char(c) => input.push(c),
        KeyCode::Backspace => {
            input.pop();
        }
        KeyCode::Esc => app.search_input = None,
        KeyCode::Enter => {
            let value = app.search_input.take().unwrap_or_default();
            app.host_groups.search_value = value.trim().to_string();
            app.host_groups.reset_for_reload();
            return Command::SearchHostGroups;
        }
        _ => {}
    }
    Command::None
}

fn handle_modal_key(app: &mut App, key: KeyEvent) -> Command {
    let Some(modal) = app.modal.as_mut() else {
        return Command::None;
    };
    match modal {
        Modal::Help => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?')
            ) {
                app.modal = None;
            }
        }
        Modal::AddHostGroup(form) => match key.code {
            KeyCode::Esc => app.modal = None,
            KeyCode::Tab | KeyCode::BackTab => form.focus_next(),
            KeyCode::Backspace => form.focused_field_mut().backspace(),
            KeyCode::Char(c) => form.focused_field_mut().push(c),
            KeyCode::Enter if form.can_submit() => {
                return Command::AddHostGroup {
                    cn: form.name.value.clone(),
                    description: form.description_value().map(str::to_string),
                };
            }
            _ => {}
        },
        Modal::DeleteHostGroups { keys } => match key.code {
            KeyCode::Esc | KeyCode::Char('n') => app.modal = None,
            KeyCode::Enter | KeyCode::Char('y') => {
                return Command::DeleteHostGroups { keys: keys.clone() };
            }
            _ => {}
        },
    }
    Command::None
}

fn handle_edit_key(app: &mut App, key: KeyEvent) {
    let state = &mut app.id_view;
    match key.code {
        KeyCode::Enter => state.commit_edit(),
        KeyCode::Esc => state.cancel_edit(),
        KeyCode::Backspace => {
            if let Some(buffer) = state.editing.as_mut() {
                buffer.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(buffer) = state.editing.as_mut() {
                buffer.push(c);
            }
        }
        _ => {}
    }
}

/// Routes a key to the open bulk menu. Returns true when the key was consumed;
/// any other key closes the menu and still reaches the view.
fn handle_menu_key(app: &mut App, key: KeyEvent) -> bool {
    let view = &mut app.host_groups;
    let count = MenuItem::ALL.len();
    match key.code {
        KeyCode::Esc => view
            .bulk
            .handle_menu_input(MenuInput::Escape, &app.capture)
            .is_consumed(),
        KeyCode::Tab => view
            .bulk
            .handle_menu_input(MenuInput::Tab, &app.capture)
            .is_consumed(),
        KeyCode::Char('b') => view
            .bulk
            .handle_menu_input(MenuInput::ToggleClick, &app.capture)
            .is_consumed(),
        KeyCode::Down | KeyCode::Char('j') => {
            view.bulk.menu_mut().highlight_next(count);
            true
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view.bulk.menu_mut().highlight_previous(count);
            true
        }
        KeyCode::Enter => {
            view.activate_highlighted();
            true
        }
        _ => view
            .bulk
            .handle_menu_input(MenuInput::Activity { inside: false }, &app.capture)
            .is_consumed(),
    }
}

pub fn handle_action(app: &mut App, action: Action) -> Command {
    match action {
        Action::Quit => return Command::Quit,
        Action::NextView => {
            let next = app.active_view.next();
            return enter_view(app, next);
        }
        Action::PrevView => {
            let previous = app.active_view.previous();
            return enter_view(app, previous);
        }
        Action::OpenHelp => app.modal = Some(Modal::Help),
        Action::Cancel => {
            if let Some(key) = app.alerts.latest().map(|note| note.key.clone()) {
                app.alerts.dismiss(&key);
            }
        }
        _ => {
            return match app.active_view {
                View::HostGroups => host_groups_action(app, action),
                View::IdViewSettings => id_view_action(app, action),
            };
        }
    }
    Command::None
}

fn enter_view(app: &mut App, view: View) -> Command {
    app.switch_view(view);
    if view == View::IdViewSettings && app.id_view.current.is_none() && !app.id_view.is_loading {
        app.id_view.is_loading = true;
        return Command::LoadIdView;
    }
    Command::None
}

fn host_groups_action(app: &mut App, action: Action) -> Command {
    let view = &mut app.host_groups;
    match action {
        Action::MoveDown => view.move_down(),
        Action::MoveUp => view.move_up(),
        Action::ToggleRow => {
            view.toggle_row_selected();
        }
        Action::ToggleBulkMenu => {
            view.bulk.toggle_menu(&app.capture);
        }
        Action::ToggleBulkCheckbox => view.toggle_bulk_checkbox(),
        Action::SelectAll => view.select_all(),
        Action::NextPage => {
            if view.next_page() {
                view.begin_loading();
                return Command::LoadHostGroups;
            }
        }
        Action::PrevPage => {
            if view.previous_page() {
                view.begin_loading();
                return Command::LoadHostGroups;
            }
        }
        Action::CyclePerPage => {
            view.cycle_per_page();
            view.begin_loading();
            return Command::LoadHostGroups;
        }
        Action::OpenSearch => app.search_input = Some(view.search_value.clone()),
        Action::Refresh => {
            view.reset_for_reload();
            return Command::LoadHostGroups;
        }
        Action::NewItem => app.modal = Some(Modal::AddHostGroup(AddHostGroupForm::new())),
        Action::DeleteItem => {
            if view.delete_enabled {
                app.modal = Some(Modal::DeleteHostGroups {
                    keys: view.selected_keys(),
                });
            } else {
                app.alerts.add(
                    "delete-disabled",
                    NotificationLevel::Warning,
                    "Select host groups to delete first",
                );
            }
        }
        _ => {}
    }
    Command::None
}

fn id_view_action(app: &mut App, action: Action) -> Command {
    let state = &mut app.id_view;
    match action {
        Action::MoveDown | Action::MoveUp => state.focus_next(),
        Action::EditItem | Action::Confirm => {
            state.begin_edit();
        }
        Action::Revert => {
            if state.revert() {
                app.alerts.add(
                    "revert-success",
                    NotificationLevel::Success,
                    "ID view data reverted",
                );
            }
        }
        Action::Save => {
            if state.is_modified() && !state.is_saving {
                state.is_saving = true;
                return Command::SaveIdView;
            }
        }
        Action::Refresh => {
            state.is_loading = true;
            return Command::LoadIdView;
        }
        _ => {}
    }
    Command::None
}

/// Performs `command` against the backend. Returns true when the console
/// should exit.
pub async fn run_command(app: &mut App, command: Command) -> bool {
    match command {
        Command::None => {}
        Command::Quit => return true,
        Command::LoadHostGroups => load_host_groups(app, LOAD_ERROR).await,
        Command::SearchHostGroups => load_host_groups(app, SEARCH_ERROR).await,
        Command::AddHostGroup { cn, description } => {
            match app.rpc.add_host_group(&cn, description.as_deref()).await {
                Ok(_) => {
                    info!(cn = %cn, "host group added");
                    app.notify(
                        "add-hostgroup-success",
                        NotificationLevel::Success,
                        "New host group added",
                    );
                    app.modal = None;
                    app.host_groups.reset_for_reload();
                    load_host_groups(app, LOAD_ERROR).await;
                }
                Err(err) => {
                    warn!(cn = %cn, error = %err, "add host group failed");
                    app.notify(
                        "add-hostgroup-error",
                        NotificationLevel::Error,
                        err.user_message(),
                    );
                }
            }
        }
        Command::DeleteHostGroups { keys } => {
            app.modal = None;
            match app.rpc.delete_host_groups(&keys).await {
                Ok(()) => {
                    info!(count = keys.len(), "host groups removed");
                    app.notify(
                        "remove-hostgroups-success",
                        NotificationLevel::Success,
                        "Host groups removed",
                    );
                    app.host_groups.reset_for_reload();
                    load_host_groups(app, LOAD_ERROR).await;
                }
                Err(err) => {
                    warn!(count = keys.len(), error = %err, "remove host groups failed");
                    app.notify(
                        "remove-hostgroups-error",
                        NotificationLevel::Error,
                        err.user_message(),
                    );
                }
            }
        }
        Command::LoadIdView => {
            let result = app.rpc.show_id_view(&app.config.id_view).await;
            app.id_view.is_loading = false;
            match result {
                Ok(view) => app.id_view.apply_loaded(view),
                Err(err) => {
                    warn!(error = %err, "load ID view failed");
                    app.notify(
                        "id-view-load-error",
                        NotificationLevel::Error,
                        err.user_message(),
                    );
                }
            }
        }
        Command::SaveIdView => {
            let modified = app.id_view.modified_values();
            let result = app.rpc.save_id_view(&app.config.id_view, modified).await;
            match result {
                Ok(saved) => {
                    info!(view = %app.config.id_view, "ID view modified");
                    app.id_view.mark_saved(saved);
                    app.notify("save-success", NotificationLevel::Success, "ID view modified");
                }
                Err(err) => {
                    warn!(error = %err, "save ID view failed");
                    app.id_view.is_saving = false;
                    app.notify("save-error", NotificationLevel::Error, err.user_message());
                }
            }
        }
    }
    false
}

/// Alert key and fallback text for a failed host group fetch.
struct LoadFailure {
    key: &'static str,
    fallback: &'static str,
}

const LOAD_ERROR: LoadFailure = LoadFailure {
    key: "host-groups-load-error",
    fallback: "Error when loading host groups",
};

const SEARCH_ERROR: LoadFailure = LoadFailure {
    key: "submit-search-value-error",
    fallback: "Error when searching for host groups",
};

async fn load_host_groups(app: &mut App, failure: LoadFailure) {
    let (start, stop) = app.host_groups.page_bounds();
    app.host_groups.begin_loading();
    let result = app
        .rpc
        .host_group_page(&app.host_groups.search_value, start, stop)
        .await;
    match result {
        Ok(page) => {
            info!(
                rows = page.rows.len(),
                total = page.total_count,
                selected = app.host_groups.selection.len(),
                "host groups loaded"
            );
            app.host_groups.apply_page(page);
        }
        Err(err) => {
            warn!(error = %err, "load host groups failed");
            app.host_groups.show_rows = true;
            let message = err.user_message();
            let message = if message.is_empty() {
                failure.fallback.to_string()
            } else {
                message
            };
            app.notify(failure.key, NotificationLevel::Error, message);
        }
    }
}
