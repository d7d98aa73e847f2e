use chrono::{Duration, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use idm_select::{MenuItem, TriState};
use idm_tui::actions::{handle_key, Command};
use idm_tui::config::{AuthConfig, ThemeConfig, TuiConfig};
use idm_tui::keys::{map_key, Action};
use idm_tui::model::{HostGroup, HostGroupPage, IdView};
use idm_tui::nav::View;
use idm_tui::notifications::{NotificationLevel, ALERT_TTL_SECS};
use idm_tui::rpc::RpcClient;
use idm_tui::state::{App, Modal};
use idm_tui::theme::{notification_color, tri_state_color, ConsoleTheme};
use proptest::prelude::*;

fn base_config() -> TuiConfig {
    TuiConfig {
        rpc_url: "https://ipa.example.test/ipa/session/json".to_string(),
        api_version: "2.251".to_string(),
        auth: AuthConfig {
            session_cookie: Some("ipa_session=test".to_string()),
            bearer_token: None,
        },
        request_timeout_ms: 5_000,
        page_size: 5,
        id_view: "Default Trust View".to_string(),
        persistence_path: "tmp/idm-tui.json".into(),
        log_path: "tmp/idm-tui.log".into(),
        theme: ThemeConfig {
            name: "midnight".to_string(),
        },
    }
}

fn test_app() -> App {
    let config = base_config();
    let rpc = RpcClient::new(&config).unwrap();
    App::new(config, rpc)
}

fn loaded_app(count: usize) -> App {
    let mut app = test_app();
    let all: Vec<HostGroup> = (0..count)
        .map(|i| HostGroup::named(format!("hostgroup{i:02}")))
        .collect();
    let (start, stop) = app.host_groups.page_bounds();
    app.host_groups.apply_page(HostGroupPage {
        rows: all[start.min(count)..stop.min(count)].to_vec(),
        universe: all.clone(),
        total_count: count,
    });
    app
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

fn press(app: &mut App, code: KeyCode) -> Command {
    handle_key(app, key(code))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

#[test]
fn config_requires_auth() {
    let mut config = base_config();
    config.auth = AuthConfig {
        session_cookie: None,
        bearer_token: None,
    };
    assert!(config.validate().is_err());
}

#[test]
fn config_requires_theme_name() {
    let mut config = base_config();
    config.theme = ThemeConfig {
        name: "unknown".to_string(),
    };
    assert!(config.validate().is_err());
}

#[test]
fn bulk_menu_select_page_via_keys() {
    let mut app = loaded_app(12);
    assert_eq!(press(&mut app, KeyCode::Char('b')), Command::None);
    assert!(app.capture.is_active());

    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Char('j'));
    assert_eq!(
        MenuItem::ALL[app.host_groups.bulk.menu().highlighted()],
        MenuItem::SelectPage
    );
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.host_groups.selection.len(), 5);
    assert!(app.host_groups.delete_enabled);
    assert!(!app.capture.is_active());
    assert_eq!(app.host_groups.tri_state(), TriState::Indeterminate);
}

#[test]
fn escape_and_tab_close_menu_without_side_effects() {
    let mut app = loaded_app(3);
    press(&mut app, KeyCode::Char('b'));
    assert_eq!(press(&mut app, KeyCode::Esc), Command::None);
    assert!(!app.capture.is_active());

    press(&mut app, KeyCode::Char('b'));
    assert_eq!(press(&mut app, KeyCode::Tab), Command::None);
    assert!(!app.capture.is_active());
    assert_eq!(app.active_view, View::HostGroups);
}

#[test]
fn other_keys_close_menu_and_still_apply() {
    let mut app = loaded_app(3);
    press(&mut app, KeyCode::Char('b'));
    assert_eq!(press(&mut app, KeyCode::Char('q')), Command::Quit);
    assert!(!app.host_groups.bulk.is_menu_open());

    press(&mut app, KeyCode::Char('b'));
    press(&mut app, KeyCode::Char('a'));
    assert!(!app.capture.is_active());
    assert_eq!(app.host_groups.tri_state(), TriState::Checked);
}

#[test]
fn select_all_then_checkbox_clears_visible_page() {
    let mut app = loaded_app(8);
    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.host_groups.selection.len(), 8);
    press(&mut app, KeyCode::Char('x'));
    assert_eq!(app.host_groups.selection.len(), 3);
}

#[test]
fn delete_requires_selection() {
    let mut app = loaded_app(4);
    assert_eq!(press(&mut app, KeyCode::Char('d')), Command::None);
    assert!(app.modal.is_none());
    let alert = app.alerts.latest().unwrap();
    assert_eq!(alert.level, NotificationLevel::Warning);

    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Char('d'));
    assert!(matches!(app.modal, Some(Modal::DeleteHostGroups { .. })));
    assert_eq!(
        press(&mut app, KeyCode::Enter),
        Command::DeleteHostGroups {
            keys: vec!["hostgroup00".to_string()]
        }
    );
}

#[test]
fn add_modal_blocks_invalid_names() {
    let mut app = loaded_app(1);
    press(&mut app, KeyCode::Char('n'));
    assert!(matches!(app.modal, Some(Modal::AddHostGroup(_))));
    assert_eq!(press(&mut app, KeyCode::Enter), Command::None);

    type_text(&mut app, "web servers");
    assert_eq!(press(&mut app, KeyCode::Enter), Command::None);

    for _ in 0.."servers".len() + 1 {
        press(&mut app, KeyCode::Backspace);
    }
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "Front end");
    assert_eq!(
        press(&mut app, KeyCode::Enter),
        Command::AddHostGroup {
            cn: "web".to_string(),
            description: Some("Front end".to_string()),
        }
    );
    assert!(app.modal.is_some());

    press(&mut app, KeyCode::Esc);
    assert!(app.modal.is_none());
}

#[test]
fn search_submit_resets_selection_and_page() {
    let mut app = loaded_app(12);
    press(&mut app, KeyCode::Char('a'));
    assert_eq!(press(&mut app, KeyCode::Char(']')), Command::LoadHostGroups);
    assert_eq!(app.host_groups.pagination.page, 2);

    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, " db ");
    assert_eq!(press(&mut app, KeyCode::Enter), Command::SearchHostGroups);
    assert_eq!(app.host_groups.search_value, "db");
    assert_eq!(app.host_groups.pagination.page, 1);
    assert!(app.host_groups.selection.is_empty());
    assert!(!app.host_groups.delete_enabled);
}

#[test]
fn page_change_keeps_selection() {
    let mut app = loaded_app(12);
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Char(']'));
    assert_eq!(app.host_groups.selection.len(), 1);
    assert_eq!(press(&mut app, KeyCode::Char('[')), Command::LoadHostGroups);
    assert_eq!(press(&mut app, KeyCode::Char('[')), Command::None);
}

#[test]
fn id_view_edit_revert_and_save() {
    let mut app = test_app();
    assert_eq!(press(&mut app, KeyCode::Tab), Command::LoadIdView);
    assert_eq!(app.active_view, View::IdViewSettings);
    app.id_view.apply_loaded(IdView {
        cn: "Default Trust View".to_string(),
        description: None,
        domain_resolution_order: Some("ad.example.test".to_string()),
    });

    assert_eq!(press(&mut app, KeyCode::Char('s')), Command::None);
    press(&mut app, KeyCode::Char('e'));
    type_text(&mut app, ":ipa.example.test");
    press(&mut app, KeyCode::Enter);
    assert!(app.id_view.is_modified());

    press(&mut app, KeyCode::Char('u'));
    assert!(!app.id_view.is_modified());
    assert_eq!(
        app.alerts.latest().map(|n| n.message.as_str()),
        Some("ID view data reverted")
    );

    press(&mut app, KeyCode::Char('e'));
    type_text(&mut app, ":ipa.example.test");
    press(&mut app, KeyCode::Enter);
    assert_eq!(press(&mut app, KeyCode::Char('s')), Command::SaveIdView);
    assert!(app.id_view.is_saving);
    assert_eq!(press(&mut app, KeyCode::Char('s')), Command::None);
}

#[test]
fn second_toggle_closes_menu_without_reaching_view() {
    let mut app = loaded_app(3);
    press(&mut app, KeyCode::Char('b'));
    assert_eq!(press(&mut app, KeyCode::Char('b')), Command::None);
    assert!(!app.capture.is_active());
    assert!(!app.host_groups.bulk.is_menu_open());
    assert!(app.host_groups.selection.is_empty());
    assert_eq!(app.host_groups.tri_state(), TriState::Unchecked);
}

#[test]
fn tick_expires_stale_alerts() {
    let mut app = test_app();
    app.notify("save-success", NotificationLevel::Success, "ID view modified");
    app.on_tick(Utc::now());
    assert_eq!(app.alerts.len(), 1);
    app.on_tick(Utc::now() + Duration::seconds(ALERT_TTL_SECS));
    assert!(app.alerts.is_empty());
}

#[test]
fn switching_view_releases_menu_capture() {
    let mut app = loaded_app(2);
    press(&mut app, KeyCode::Char('b'));
    app.switch_view(View::IdViewSettings);
    assert!(!app.capture.is_active());
}

proptest! {
    #[test]
    fn all_action_keys_mapped(key_char in "[qbxa\\[\\]p/rndeus? ]") {
        let c = key_char.chars().next().unwrap();
        prop_assert!(map_key(key(KeyCode::Char(c))).is_some());
    }

    #[test]
    fn unbound_letters_ignored(c in prop::sample::select(vec!['c', 'f', 'g', 'h', 'i', 'l', 'm', 'o', 't', 'v', 'w', 'y', 'z'])) {
        prop_assert_eq!(map_key(key(KeyCode::Char(c))), None);
    }

    #[test]
    fn navigation_keys_consistent(use_vim in prop::bool::ANY) {
        let (up, down) = if use_vim {
            (KeyCode::Char('k'), KeyCode::Char('j'))
        } else {
            (KeyCode::Up, KeyCode::Down)
        };
        prop_assert_eq!(map_key(key(up)), Some(Action::MoveUp));
        prop_assert_eq!(map_key(key(down)), Some(Action::MoveDown));
    }

    #[test]
    fn tri_state_colors_distinct(state in prop::sample::select(vec![TriState::Checked, TriState::Indeterminate, TriState::Unchecked])) {
        let theme = ConsoleTheme::midnight();
        let color = tri_state_color(state, &theme);
        let expected = match state {
            TriState::Checked => theme.primary,
            TriState::Indeterminate => theme.tertiary,
            TriState::Unchecked => theme.text_dim,
        };
        prop_assert_eq!(color, expected);
    }

    #[test]
    fn row_toggles_keep_delete_flag_in_sync(toggles in prop::collection::vec((0usize..5, any::<bool>()), 0..30)) {
        let mut app = loaded_app(5);
        for (row, down) in toggles {
            app.host_groups.cursor = row;
            press(&mut app, KeyCode::Char(' '));
            if down {
                press(&mut app, KeyCode::Char('j'));
            }
            prop_assert_eq!(app.host_groups.delete_enabled, !app.host_groups.selection.is_empty());
        }
    }
}

#[test]
fn tab_switches_views() {
    assert_eq!(map_key(key(KeyCode::Tab)), Some(Action::NextView));
    assert_eq!(map_key(key(KeyCode::BackTab)), Some(Action::PrevView));
}

#[test]
fn error_notifications_have_correct_color() {
    let theme = ConsoleTheme::midnight();
    assert_eq!(notification_color(NotificationLevel::Error, &theme), theme.error);
    assert_eq!(notification_color(NotificationLevel::Success, &theme), theme.success);
}
