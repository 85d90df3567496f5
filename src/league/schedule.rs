use super::ConfigError;
use super::roster::{ParticipantId, Roster};
use fpl_api::GameweekId;
use std::collections::{BTreeMap, HashSet};
use std::ops::RangeInclusive;

/// Hand-written weekly pairings, by display name: `(gameweek, [(left, right), ...])`.
pub type NamedSchedule<'a> = [(GameweekId, &'a [(&'a str, &'a str)])];

/// One head-to-head fixture. Left and right only affect display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing {
    pub left: ParticipantId,
    pub right: ParticipantId,
}

/// Fully enumerated season schedule keyed by participant id.
///
/// Every gameweek in `1..=gameweek_count()` is present and pairs off the whole
/// roster, each participant exactly once.
#[derive(Debug, Clone)]
pub struct ScheduleTable {
    weeks: Vec<Vec<Pairing>>,
}

impl ScheduleTable {
    /// Resolve a name-keyed pairing table against the roster.
    ///
    /// Rejects unknown names, anyone paired twice in a week, anyone left out of
    /// a week, and gameweek numbering that is not exactly `1..=N`.
    pub fn from_names(roster: &Roster, by_name: &NamedSchedule<'_>) -> Result<Self, ConfigError> {
        let mut sorted: BTreeMap<GameweekId, &[(&str, &str)]> = BTreeMap::new();
        for &(gw, pairs) in by_name {
            if sorted.insert(gw, pairs).is_some() {
                return Err(ConfigError::DuplicateGameweek(gw));
            }
        }
        if sorted.is_empty() {
            return Err(ConfigError::EmptySchedule);
        }

        let mut weeks = Vec::with_capacity(sorted.len());
        for (expected, (gw, pairs)) in (1..).zip(sorted) {
            if gw != expected {
                return Err(ConfigError::GapInSchedule { expected, found: gw });
            }
            weeks.push(resolve_week(roster, gw, pairs)?);
        }

        Ok(Self { weeks })
    }

    /// Highest gameweek number in the table.
    pub fn gameweek_count(&self) -> GameweekId {
        self.weeks.len() as GameweekId
    }

    pub fn gameweeks(&self) -> RangeInclusive<GameweekId> {
        1..=self.gameweek_count()
    }

    /// Pairings for one gameweek in source order; empty outside the season.
    pub fn pairs_for(&self, gameweek: GameweekId) -> &[Pairing] {
        gameweek
            .checked_sub(1)
            .and_then(|idx| self.weeks.get(idx as usize))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every fixture of the season, gameweek by gameweek.
    pub fn iter(&self) -> impl Iterator<Item = (GameweekId, &Pairing)> + '_ {
        self.gameweeks()
            .flat_map(move |gw| self.pairs_for(gw).iter().map(move |p| (gw, p)))
    }
}

fn resolve_week(
    roster: &Roster,
    gameweek: GameweekId,
    pairs: &[(&str, &str)],
) -> Result<Vec<Pairing>, ConfigError> {
    let lookup = |name: &str| {
        roster.id_for_name(name).ok_or_else(|| ConfigError::UnknownParticipant {
            gameweek,
            name: name.to_string(),
        })
    };

    let mut seen: HashSet<ParticipantId> = HashSet::new();
    let mut week = Vec::with_capacity(pairs.len());
    for &(left_name, right_name) in pairs {
        let left = lookup(left_name)?;
        let right = lookup(right_name)?;
        for (id, name) in [(left, left_name), (right, right_name)] {
            if !seen.insert(id) {
                return Err(ConfigError::DuplicateParticipant {
                    gameweek,
                    name: name.to_string(),
                });
            }
        }
        week.push(Pairing { left, right });
    }

    let missing: Vec<String> = roster
        .participants()
        .iter()
        .filter(|p| !seen.contains(&p.id))
        .map(|p| p.name.clone())
        .collect();
    if !missing.is_empty() {
        return Err(ConfigError::IncompletePairing { gameweek, missing });
    }

    Ok(week)
}
