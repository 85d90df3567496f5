pub mod cache;
pub mod client;
pub mod fpl;

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Domain types, independent of the FPL wire format
// ---------------------------------------------------------------------------

/// FPL entry id. Externally assigned, stable for the season.
pub type EntryId = u64;

/// Gameweek number, 1-indexed.
pub type GameweekId = u32;

/// Points scored by one entry, keyed by gameweek. Gameweeks with no record are
/// simply absent; callers treat them as 0.
pub type GameweekPoints = BTreeMap<GameweekId, i32>;

/// One gameweek of the season calendar as reported by the FPL service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gameweek {
    pub id: GameweekId,
    pub deadline: Option<DateTime<Utc>>,
    pub is_previous: bool,
    pub is_current: bool,
}

/// The season calendar, in the order the service returned it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeasonCalendar {
    pub gameweeks: Vec<Gameweek>,
}

impl SeasonCalendar {
    /// The gameweek flagged as current. The first flagged one wins if the
    /// service ever reports more than one.
    pub fn current(&self) -> Option<GameweekId> {
        self.gameweeks.iter().find(|gw| gw.is_current).map(|gw| gw.id)
    }

    /// The highest gameweek flagged as previous.
    pub fn previous(&self) -> Option<GameweekId> {
        self.gameweeks
            .iter()
            .filter(|gw| gw.is_previous)
            .map(|gw| gw.id)
            .max()
    }

    pub fn deadline(&self, id: GameweekId) -> Option<DateTime<Utc>> {
        self.gameweeks.iter().find(|gw| gw.id == id).and_then(|gw| gw.deadline)
    }
}

/// Public page for one entry's team in one gameweek.
pub fn entry_event_url(entry: EntryId, gameweek: GameweekId) -> String {
    format!("https://fantasy.premierleague.com/entry/{entry}/event/{gameweek}")
}
