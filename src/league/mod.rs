pub mod builtin;
pub mod current;
pub mod resolver;
pub mod roster;
pub mod schedule;
pub mod tables;

use fpl_api::{GameweekId, GameweekPoints};
use std::collections::HashMap;
use std::fmt;

pub use roster::{Participant, ParticipantId, Roster, Team, TeamKey};
pub use schedule::{Pairing, ScheduleTable};
pub use tables::{LeagueTables, aggregate};

/// Raw source data for one fetch cycle, keyed by participant.
pub type PointsByParticipant = HashMap<ParticipantId, GameweekPoints>;

/// The league definition: who plays, for which team, against whom, and when.
/// Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct League {
    pub name: String,
    pub roster: Roster,
    pub schedule: ScheduleTable,
}

impl League {
    pub fn aggregate(&self, points: &PointsByParticipant) -> LeagueTables {
        aggregate(&self.roster, &self.schedule, points)
    }

    pub fn gameweek_count(&self) -> GameweekId {
        self.schedule.gameweek_count()
    }
}

/// A roster or schedule that cannot be turned into a league. Always fatal:
/// every derived table would be wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownParticipant { gameweek: GameweekId, name: String },
    DuplicateParticipant { gameweek: GameweekId, name: String },
    IncompletePairing { gameweek: GameweekId, missing: Vec<String> },
    DuplicateGameweek(GameweekId),
    GapInSchedule { expected: GameweekId, found: GameweekId },
    EmptySchedule,
    DuplicateRosterEntry(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownParticipant { gameweek, name } => {
                write!(f, "GW{gameweek}: '{name}' is not on the roster")
            }
            ConfigError::DuplicateParticipant { gameweek, name } => {
                write!(f, "GW{gameweek}: '{name}' is paired more than once")
            }
            ConfigError::IncompletePairing { gameweek, missing } => {
                write!(f, "GW{gameweek}: no fixture for {}", missing.join(", "))
            }
            ConfigError::DuplicateGameweek(gw) => write!(f, "GW{gw} is listed twice"),
            ConfigError::GapInSchedule { expected, found } => {
                write!(f, "schedule jumps to GW{found}, expected GW{expected}")
            }
            ConfigError::EmptySchedule => write!(f, "schedule has no gameweeks"),
            ConfigError::DuplicateRosterEntry(what) => write!(f, "duplicate roster entry: {what}"),
        }
    }
}

impl std::error::Error for ConfigError {}
