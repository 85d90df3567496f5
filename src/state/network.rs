use crate::league::{ParticipantId, PointsByParticipant};
use crate::state::messages::{NetworkRequest, NetworkResponse};
use fpl_api::cache::{CALENDAR_TTL, POINTS_TTL, TtlCache};
use fpl_api::client::FplApi;
use fpl_api::{GameweekPoints, SeasonCalendar};
use log::{debug, error, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Result of one full fetch cycle.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub points: PointsByParticipant,
    pub calendar: Option<SeasonCalendar>,
    pub failed: Vec<ParticipantId>,
}

/// Fetches every participant one after the other, memoizing each entry's
/// history for `POINTS_TTL` and the season calendar for `CALENDAR_TTL`.
/// A failed fetch is memoized too: it counts as an empty history and stays in
/// `failed` until the window lapses or the caches are invalidated.
pub struct LeagueFetcher {
    client: FplApi,
    participants: Vec<ParticipantId>,
    /// `None` marks an entry whose last fetch failed.
    points_cache: TtlCache<ParticipantId, Option<GameweekPoints>>,
    calendar_cache: TtlCache<(), Option<SeasonCalendar>>,
}

impl LeagueFetcher {
    pub fn new(client: FplApi, participants: Vec<ParticipantId>) -> Self {
        Self {
            client,
            participants,
            points_cache: TtlCache::new(POINTS_TTL),
            calendar_cache: TtlCache::new(CALENDAR_TTL),
        }
    }

    pub fn invalidate(&mut self) {
        self.points_cache.clear();
        self.calendar_cache.clear();
    }

    pub async fn fetch(&mut self) -> FetchOutcome {
        let mut outcome = FetchOutcome::default();

        for &id in &self.participants {
            let cached = match self.points_cache.get(&id) {
                Some(cached) => cached,
                None => {
                    let fetched = match self.client.fetch_entry_history(id).await {
                        Ok(points) => Some(points),
                        Err(e) => {
                            warn!("entry {id} unavailable, counting as no points: {e}");
                            None
                        }
                    };
                    self.points_cache.insert(id, fetched.clone());
                    fetched
                }
            };
            if cached.is_none() {
                outcome.failed.push(id);
            }
            outcome.points.insert(id, cached.unwrap_or_default());
        }

        outcome.calendar = match self.calendar_cache.get(&()) {
            Some(calendar) => calendar,
            None => {
                let calendar = match self.client.fetch_calendar().await {
                    Ok(calendar) => Some(calendar),
                    Err(e) => {
                        debug!("season calendar unavailable: {e}");
                        None
                    }
                };
                self.calendar_cache.insert((), calendar.clone());
                calendar
            }
        };

        outcome
    }
}

pub struct NetworkWorker {
    fetcher: LeagueFetcher,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        fetcher: LeagueFetcher,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            fetcher,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            if let NetworkRequest::ReloadLeague = request {
                debug!("dropping cached league data");
                self.fetcher.invalidate();
            }
            debug!("loading league points");
            let outcome = self.fetcher.fetch().await;

            debug!("network request complete");
            self.stop_loading_animation(outcome.failed.is_empty()).await;

            let response = NetworkResponse::LeagueLoaded {
                points: outcome.points,
                calendar: outcome.calendar,
                failed: outcome.failed,
            };
            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
