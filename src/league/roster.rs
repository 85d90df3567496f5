use super::ConfigError;
use fpl_api::EntryId;
use serde::Serialize;
use std::collections::HashSet;

pub type ParticipantId = EntryId;

/// Which of the two league teams. Home sits on the left of every fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamKey {
    Home,
    Away,
}

impl TeamKey {
    pub const ALL: [TeamKey; 2] = [TeamKey::Home, TeamKey::Away];

    fn index(self) -> usize {
        match self {
            TeamKey::Home => 0,
            TeamKey::Away => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub key: TeamKey,
    pub name: String,
    /// `#rrggbb` accent used by the dashboard.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub team: TeamKey,
}

/// The closed set of participants, in display order.
#[derive(Debug, Clone)]
pub struct Roster {
    teams: [Team; 2],
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new(home: Team, away: Team, participants: Vec<Participant>) -> Result<Self, ConfigError> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for p in &participants {
            if !ids.insert(p.id) {
                return Err(ConfigError::DuplicateRosterEntry(format!("id {}", p.id)));
            }
            if !names.insert(p.name.as_str()) {
                return Err(ConfigError::DuplicateRosterEntry(format!("name {}", p.name)));
            }
        }
        let home = Team { key: TeamKey::Home, ..home };
        let away = Team { key: TeamKey::Away, ..away };
        Ok(Self { teams: [home, away], participants })
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn ids(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.participants.iter().map(|p| p.id)
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn id_for_name(&self, name: &str) -> Option<ParticipantId> {
        self.participants.iter().find(|p| p.name == name).map(|p| p.id)
    }

    pub fn team(&self, key: TeamKey) -> &Team {
        &self.teams[key.index()]
    }

    pub fn teams(&self) -> &[Team; 2] {
        &self.teams
    }

    pub fn members(&self, key: TeamKey) -> impl Iterator<Item = &Participant> + '_ {
        self.participants.iter().filter(move |p| p.team == key)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(name: &str) -> Team {
        Team { key: TeamKey::Home, name: name.into(), color: "#000000".into() }
    }

    fn p(id: ParticipantId, name: &str, team: TeamKey) -> Participant {
        Participant { id, name: name.into(), team }
    }

    #[test]
    fn teams_are_keyed_by_position() {
        let roster = Roster::new(team("Left"), team("Right"), vec![]).unwrap();
        assert_eq!(roster.team(TeamKey::Home).name, "Left");
        assert_eq!(roster.team(TeamKey::Away).name, "Right");
        assert_eq!(roster.team(TeamKey::Away).key, TeamKey::Away);
    }

    #[test]
    fn lookup_by_name_and_id() {
        let roster = Roster::new(
            team("T1"),
            team("T2"),
            vec![p(10, "A", TeamKey::Home), p(20, "B", TeamKey::Away)],
        )
        .unwrap();
        assert_eq!(roster.id_for_name("B"), Some(20));
        assert_eq!(roster.id_for_name("C"), None);
        assert_eq!(roster.participant(10).map(|p| p.name.as_str()), Some("A"));
        assert_eq!(roster.members(TeamKey::Away).count(), 1);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let err = Roster::new(
            team("T1"),
            team("T2"),
            vec![p(10, "A", TeamKey::Home), p(20, "A", TeamKey::Away)],
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateRosterEntry("name A".into()));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let err = Roster::new(
            team("T1"),
            team("T2"),
            vec![p(10, "A", TeamKey::Home), p(10, "B", TeamKey::Away)],
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateRosterEntry("id 10".into()));
    }
}
