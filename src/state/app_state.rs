use crate::app::MenuItem;
use crate::league::LeagueTables;
use fpl_api::{GameweekId, SeasonCalendar};

// ---------------------------------------------------------------------------
// League state
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct LeagueState {
    pub tables: Option<LeagueTables>,
    pub calendar: Option<SeasonCalendar>,
    pub gameweek_count: GameweekId,
    /// Auto-detected on every load. Drives the initial dashboard gameweek.
    pub current_gameweek: GameweekId,
    /// The gameweek the user has navigated to (may differ from current_gameweek).
    pub selected_gameweek: GameweekId,
    pub pre_season: bool,
    /// Local "HH:MM" of the last completed load.
    pub last_updated: Option<String>,
    pub failed_entries: usize,
}

impl LeagueState {
    pub fn new(gameweek_count: GameweekId) -> Self {
        Self {
            tables: None,
            calendar: None,
            gameweek_count: gameweek_count.max(1),
            current_gameweek: 1,
            selected_gameweek: 1,
            pre_season: true,
            last_updated: None,
            failed_entries: 0,
        }
    }

    /// Store freshly aggregated tables. The selection follows the detected
    /// gameweek unless the user has moved away from it.
    pub fn load(
        &mut self,
        tables: LeagueTables,
        calendar: Option<SeasonCalendar>,
        current_gameweek: GameweekId,
        updated_at: String,
    ) {
        let follow = self.tables.is_none() || self.selected_gameweek == self.current_gameweek;
        self.pre_season = tables.is_pre_season();
        self.tables = Some(tables);
        self.calendar = calendar;
        self.current_gameweek = current_gameweek.clamp(1, self.gameweek_count);
        if follow {
            self.selected_gameweek = self.current_gameweek;
        }
        self.last_updated = Some(updated_at);
    }

    pub fn select_next(&mut self) {
        if self.selected_gameweek < self.gameweek_count {
            self.selected_gameweek += 1;
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected_gameweek > 1 {
            self.selected_gameweek -= 1;
        }
    }

    pub fn select_current(&mut self) {
        self.selected_gameweek = self.current_gameweek;
    }
}

// ---------------------------------------------------------------------------
// App state
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub league: LeagueState,
    pub games_scroll: u16,
    pub teams_scroll: u16,
}

impl AppState {
    pub fn new(gameweek_count: GameweekId) -> Self {
        Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            show_logs: false,
            last_error: None,
            league: LeagueState::new(gameweek_count),
            games_scroll: 0,
            teams_scroll: 0,
        }
    }
}
