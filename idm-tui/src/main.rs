//! IDM console entry point.

use chrono::Utc;
use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use idm_tui::actions::{handle_key, run_command, Command};
use idm_tui::config::TuiConfig;
use idm_tui::error::TuiError;
use idm_tui::events::TuiEvent;
use idm_tui::persistence::{self, PersistedState};
use idm_tui::rpc::RpcClient;
use idm_tui::state::App;
use idm_tui::views::render_view;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

const TICK_RATE: Duration = Duration::from_millis(500);

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    idm_tui::logging::init(&config.log_path)?;
    let rpc = RpcClient::new(&config)?;
    let mut app = App::new(config, rpc);
    match persistence::load(&app.config.persistence_path) {
        Ok(Some(state)) => {
            app.active_view = state.active_view;
            app.host_groups.pagination.set_per_page(state.per_page);
        }
        Ok(None) => {}
        Err(err) => warn!(error = %err, "ignoring unreadable persisted state"),
    }
    info!(url = %app.config.rpc_url, view = ?app.active_view, "console starting");

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx);

    app.host_groups.begin_loading();
    run_command(&mut app, Command::LoadHostGroups).await;
    if app.active_view == idm_tui::nav::View::IdViewSettings {
        app.id_view.is_loading = true;
        run_command(&mut app, Command::LoadIdView).await;
    }

    let mut ticker = tokio::time::interval(TICK_RATE);

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => app.on_tick(Utc::now()),
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, &mut terminal, event).await? {
                    break;
                }
            }
        }
    }

    let persisted = PersistedState {
        active_view: app.active_view,
        per_page: app.host_groups.pagination.per_page,
    };
    if let Err(err) = persistence::save(&app.config.persistence_path, &persisted) {
        warn!(error = %err, "failed to persist UI state");
    }
    info!("console exiting");

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                match evt {
                    CrosstermEvent::Key(key) => {
                        let _ = sender.blocking_send(TuiEvent::Input(key));
                    }
                    CrosstermEvent::Resize(width, height) => {
                        let _ = sender.blocking_send(TuiEvent::Resize { width, height });
                    }
                    _ => {}
                }
            }
        }
    });
}

async fn handle_event(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    event: TuiEvent,
) -> Result<bool, TuiError> {
    match event {
        TuiEvent::Input(key) => {
            let command = handle_key(app, key);
            if command != Command::None && command != Command::Quit {
                // show the loading state before the round-trip blocks the loop
                terminal.draw(|f| render_view(f, app))?;
            }
            return Ok(run_command(app, command).await);
        }
        TuiEvent::Resize { .. } => {}
    }
    Ok(false)
}
