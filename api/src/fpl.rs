//! Raw serde shapes for the public FPL API.
//! Mapped to the domain types in lib.rs by client.rs.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Entry history  (/api/entry/{id}/history/)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EntryHistoryResponse {
    /// One record per gameweek played this season. Absent before GW1 closes.
    #[serde(default)]
    pub current: Vec<EntryEvent>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EntryEvent {
    pub event: u32,
    /// Gross gameweek points. Transfer hits are reported separately.
    pub points: i32,
}

// ---------------------------------------------------------------------------
// Season state  (/api/bootstrap-static/)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct BootstrapResponse {
    #[serde(default)]
    pub events: Vec<BootstrapEvent>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BootstrapEvent {
    pub id: u32,
    pub deadline_time: Option<String>,
    #[serde(default)]
    pub is_previous: bool,
    #[serde(default)]
    pub is_current: bool,
}
