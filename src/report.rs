use crate::league::current::detect_current;
use crate::league::{League, LeagueTables, ParticipantId, Team};
use crate::state::network::FetchOutcome;
use fpl_api::GameweekId;
use serde::Serialize;

/// Everything `--json` prints: the league identity plus every derived table.
#[derive(Debug, Serialize)]
pub struct LeagueReport<'a> {
    pub league: &'a str,
    pub teams: &'a [Team; 2],
    pub current_gameweek: GameweekId,
    pub pre_season: bool,
    /// Entries that could not be fetched and were counted as 0.
    pub unavailable: Vec<ParticipantId>,
    #[serde(flatten)]
    pub tables: LeagueTables,
}

impl<'a> LeagueReport<'a> {
    pub fn build(league: &'a League, outcome: FetchOutcome) -> Self {
        let tables = league.aggregate(&outcome.points);
        let current_gameweek =
            detect_current(outcome.calendar.as_ref(), &tables, league.gameweek_count());
        Self {
            league: &league.name,
            teams: league.roster.teams(),
            current_gameweek,
            pre_season: tables.is_pre_season(),
            unavailable: outcome.failed,
            tables,
        }
    }
}
