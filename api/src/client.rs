use crate::fpl::{BootstrapResponse, EntryHistoryResponse};
use crate::{EntryId, Gameweek, GameweekPoints, SeasonCalendar};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const FPL_BASE_URL: &str = "https://fantasy.premierleague.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(6);

/// Fantasy Premier League client backed by the public, unauthenticated endpoints.
#[derive(Debug, Clone)]
pub struct FplApi {
    client: Client,
    timeout: Duration,
    base_url: String,
}

impl Default for FplApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("h2htui/0.1 (terminal league viewer)")
                .build()
                .unwrap_or_default(),
            timeout: REQUEST_TIMEOUT,
            base_url: FPL_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl FplApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at another host, e.g. a mirror or a test server.
    /// Trailing slashes are dropped so paths can always be appended with `/api/...`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, ..Self::default() }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one entry's per-gameweek points for the current season.
    pub async fn fetch_entry_history(&self, entry: EntryId) -> ApiResult<GameweekPoints> {
        let url = format!("{}/api/entry/{entry}/history/", self.base_url);
        let raw: EntryHistoryResponse = self.get(&url).await?;
        Ok(map_entry_history(raw))
    }

    /// Like `fetch_entry_history`, but any failure collapses to an empty map.
    /// Callers never special-case failure: an unreachable entry looks exactly
    /// like one that has not played a gameweek yet.
    pub async fn fetch_points(&self, entry: EntryId) -> GameweekPoints {
        match self.fetch_entry_history(entry).await {
            Ok(points) => points,
            Err(e) => {
                warn!("no points for entry {entry}: {e}");
                GameweekPoints::new()
            }
        }
    }

    /// Fetch the season calendar with the current/previous gameweek flags.
    pub async fn fetch_calendar(&self) -> ApiResult<SeasonCalendar> {
        let url = format!("{}/api/bootstrap-static/", self.base_url);
        let raw: BootstrapResponse = self.get(&url).await?;
        let calendar = map_bootstrap(raw);
        if calendar.gameweeks.is_empty() {
            return Err(ApiError::NotFound(format!("no events in {url}")));
        }
        Ok(calendar)
    }

    /// Any non-success status is an error; 404 becomes `NotFound`.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => {
                Err(ApiError::NotFound(url.to_owned()))
            }
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: FPL wire types → clean domain types
// ---------------------------------------------------------------------------

/// A repeated gameweek record overwrites the earlier one.
pub fn map_entry_history(raw: EntryHistoryResponse) -> GameweekPoints {
    raw.current.into_iter().map(|ev| (ev.event, ev.points)).collect()
}

pub fn map_bootstrap(raw: BootstrapResponse) -> SeasonCalendar {
    let gameweeks = raw
        .events
        .into_iter()
        .map(|ev| Gameweek {
            id: ev.id,
            deadline: ev.deadline_time.as_deref().and_then(parse_deadline),
            is_previous: ev.is_previous,
            is_current: ev.is_current,
        })
        .collect();
    SeasonCalendar { gameweeks }
}

fn parse_deadline(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
