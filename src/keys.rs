use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    let mut request = None;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Dashboard),
        (_, Char('2'), _) => guard.update_tab(MenuItem::AllGames),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Teams),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Gameweek navigation
        (MenuItem::Dashboard, Char('l') | KeyCode::Right, _) => guard.next_gameweek(),
        (MenuItem::Dashboard, Char('h') | KeyCode::Left, _) => guard.prev_gameweek(),
        (MenuItem::Dashboard, Char('c'), KeyModifiers::NONE) => guard.current_gameweek(),

        // Table scrolling
        (MenuItem::AllGames, Char('j') | KeyCode::Down, _) => guard.games_scroll_down(),
        (MenuItem::AllGames, Char('k') | KeyCode::Up, _) => guard.games_scroll_up(),
        (MenuItem::Teams, Char('j') | KeyCode::Down, _) => guard.teams_scroll_down(),
        (MenuItem::Teams, Char('k') | KeyCode::Up, _) => guard.teams_scroll_up(),

        // Refresh: cached unless forced
        (_, Char('r'), _) => request = Some(NetworkRequest::LoadLeague),
        (_, Char('R'), _) => request = Some(NetworkRequest::ReloadLeague),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    if let Some(request) = request {
        drop(guard);
        let _ = network_requests.send(request).await;
    }
}
