use super::roster::{Participant, Roster, Team, TeamKey};
use super::schedule::{NamedSchedule, ScheduleTable};
use super::{ConfigError, League};

const LEAGUE_NAME: &str = "FPL Geese vs Big Ben Brexit Sauce Appreciation Society";

const BBBSAS: &str = "Big Ben Brexit Sauce Appreciation Society";
const BBBSAS_COLOR: &str = "#8b5cf6";
const GEESE: &str = "FPL Geese";
const GEESE_COLOR: &str = "#1f8ef1";

/// FPL entry ids, Geese first. Display order for every per-participant table.
const PARTICIPANTS: [(u64, &str, TeamKey); 6] = [
    (3544410, "Torsten", TeamKey::Away),
    (5508333, "Max", TeamKey::Away),
    (727945, "Phil", TeamKey::Away),
    (1584965, "Tommi", TeamKey::Home),
    (2767628, "Pat", TeamKey::Home),
    (454394, "Frej", TeamKey::Home),
];

// BBBSAS on the left, Geese on the right. Three-week rotation, written out in full.
const SCHEDULE: &NamedSchedule<'static> = &[
    (1, &[("Frej", "Phil"), ("Tommi", "Max"), ("Pat", "Torsten")]),
    (2, &[("Frej", "Max"), ("Tommi", "Torsten"), ("Pat", "Phil")]),
    (3, &[("Frej", "Torsten"), ("Tommi", "Phil"), ("Pat", "Max")]),
    (4, &[("Frej", "Phil"), ("Tommi", "Max"), ("Pat", "Torsten")]),
    (5, &[("Frej", "Max"), ("Tommi", "Torsten"), ("Pat", "Phil")]),
    (6, &[("Frej", "Torsten"), ("Tommi", "Phil"), ("Pat", "Max")]),
    (7, &[("Frej", "Phil"), ("Tommi", "Max"), ("Pat", "Torsten")]),
    (8, &[("Frej", "Max"), ("Tommi", "Torsten"), ("Pat", "Phil")]),
    (9, &[("Frej", "Torsten"), ("Tommi", "Phil"), ("Pat", "Max")]),
    (10, &[("Frej", "Phil"), ("Tommi", "Max"), ("Pat", "Torsten")]),
    (11, &[("Frej", "Max"), ("Tommi", "Torsten"), ("Pat", "Phil")]),
    (12, &[("Frej", "Torsten"), ("Tommi", "Phil"), ("Pat", "Max")]),
    (13, &[("Frej", "Phil"), ("Tommi", "Max"), ("Pat", "Torsten")]),
    (14, &[("Frej", "Max"), ("Tommi", "Torsten"), ("Pat", "Phil")]),
    (15, &[("Frej", "Torsten"), ("Tommi", "Phil"), ("Pat", "Max")]),
    (16, &[("Frej", "Phil"), ("Tommi", "Max"), ("Pat", "Torsten")]),
    (17, &[("Frej", "Max"), ("Tommi", "Torsten"), ("Pat", "Phil")]),
    (18, &[("Frej", "Torsten"), ("Tommi", "Phil"), ("Pat", "Max")]),
];

/// The compiled-in league. Fails only if the tables above are edited into an
/// inconsistent state.
pub fn fpl_geese_vs_bbbsas() -> Result<League, ConfigError> {
    let participants = PARTICIPANTS
        .iter()
        .map(|&(id, name, team)| Participant { id, name: name.to_string(), team })
        .collect();
    let roster = Roster::new(
        Team { key: TeamKey::Home, name: BBBSAS.into(), color: BBBSAS_COLOR.into() },
        Team { key: TeamKey::Away, name: GEESE.into(), color: GEESE_COLOR.into() },
        participants,
    )?;
    let schedule = ScheduleTable::from_names(&roster, SCHEDULE)?;

    Ok(League { name: LEAGUE_NAME.to_string(), roster, schedule })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_league_is_consistent() {
        let league = fpl_geese_vs_bbbsas().unwrap();
        assert_eq!(league.gameweek_count(), 18);
        assert_eq!(league.roster.len(), 6);
        assert_eq!(league.roster.members(TeamKey::Home).count(), 3);
        assert_eq!(league.roster.members(TeamKey::Away).count(), 3);
    }

    #[test]
    fn every_fixture_is_home_against_away() {
        let league = fpl_geese_vs_bbbsas().unwrap();
        for (gw, pairing) in league.schedule.iter() {
            let left = league.roster.participant(pairing.left).unwrap();
            let right = league.roster.participant(pairing.right).unwrap();
            assert_eq!((left.team, right.team), (TeamKey::Home, TeamKey::Away), "GW{gw}");
        }
    }

    #[test]
    fn rotation_repeats_every_three_weeks() {
        let league = fpl_geese_vs_bbbsas().unwrap();
        for gw in 4..=league.gameweek_count() {
            assert_eq!(league.schedule.pairs_for(gw), league.schedule.pairs_for(gw - 3));
        }
    }

    #[test]
    fn each_home_player_meets_every_away_player_in_a_cycle() {
        let league = fpl_geese_vs_bbbsas().unwrap();
        let mut seen = std::collections::HashSet::new();
        for gw in 1..=3 {
            for p in league.schedule.pairs_for(gw) {
                assert!(seen.insert((p.left, p.right)));
            }
        }
        assert_eq!(seen.len(), 9);
    }
}
