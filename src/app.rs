use crate::league::current::detect_current;
use crate::league::{League, ParticipantId, PointsByParticipant};
use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use chrono::Local;
use fpl_api::SeasonCalendar;
use log::{info, warn};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Dashboard,
    AllGames,
    Teams,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    pub league: League,
}

impl App {
    pub fn new(league: League, settings: AppSettings) -> Self {
        let app = Self {
            state: AppState::new(league.gameweek_count()),
            settings,
            league,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network responses, applied from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_league_loaded(
        &mut self,
        points: PointsByParticipant,
        calendar: Option<SeasonCalendar>,
        failed: Vec<ParticipantId>,
    ) {
        let tables = self.league.aggregate(&points);
        let current = detect_current(calendar.as_ref(), &tables, self.league.gameweek_count());
        info!(
            "league recomputed: GW{current}, pre-season={}, {} unavailable",
            tables.is_pre_season(),
            failed.len()
        );

        self.state.last_error = if failed.is_empty() {
            None
        } else {
            let names: Vec<&str> = failed
                .iter()
                .filter_map(|id| self.league.roster.participant(*id))
                .map(|p| p.name.as_str())
                .collect();
            warn!("no data this cycle for {}", names.join(", "));
            Some(format!("No data for {} (counted as 0)", names.join(", ")))
        };
        self.state.league.failed_entries = failed.len();
        self.state
            .league
            .load(tables, calendar, current, Local::now().format("%H:%M").to_string());
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Gameweek navigation
    // -----------------------------------------------------------------------

    pub fn next_gameweek(&mut self) {
        self.state.league.select_next();
    }

    pub fn prev_gameweek(&mut self) {
        self.state.league.select_prev();
    }

    pub fn current_gameweek(&mut self) {
        self.state.league.select_current();
    }

    // -----------------------------------------------------------------------
    // Table scrolling
    // -----------------------------------------------------------------------

    pub fn games_scroll_down(&mut self) {
        let max = self
            .state
            .league
            .tables
            .as_ref()
            .map(|t| t.fixtures.len().saturating_sub(1))
            .unwrap_or(0) as u16;
        self.state.games_scroll = (self.state.games_scroll + 1).min(max);
    }

    pub fn games_scroll_up(&mut self) {
        self.state.games_scroll = self.state.games_scroll.saturating_sub(1);
    }

    pub fn teams_scroll_down(&mut self) {
        let max = self
            .state
            .league
            .tables
            .as_ref()
            .map(|t| t.team_weekly.len().saturating_sub(1))
            .unwrap_or(0) as u16;
        self.state.teams_scroll = (self.state.teams_scroll + 1).min(max);
    }

    pub fn teams_scroll_up(&mut self) {
        self.state.teams_scroll = self.state.teams_scroll.saturating_sub(1);
    }
}
