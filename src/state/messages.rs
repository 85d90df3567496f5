use crate::league::{ParticipantId, PointsByParticipant};
use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use fpl_api::SeasonCalendar;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    /// Fetch every participant, served from cache while fresh.
    LoadLeague,
    /// Drop the caches first.
    ReloadLeague,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    LeagueLoaded {
        points: PointsByParticipant,
        calendar: Option<SeasonCalendar>,
        /// Entries whose fetch failed this cycle; their points are empty.
        failed: Vec<ParticipantId>,
    },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
