use super::PointsByParticipant;
use super::resolver::{Outcome, resolve};
use super::roster::{Participant, ParticipantId, Roster, TeamKey};
use super::schedule::ScheduleTable;
use fpl_api::GameweekId;
use log::warn;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// Winner label for a tied fixture.
pub const DRAW: &str = "Draw";

// ---------------------------------------------------------------------------
// Derived rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyRow {
    pub gameweek: GameweekId,
    pub participant_id: ParticipantId,
    pub participant_name: String,
    pub team: TeamKey,
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureSide {
    pub participant_id: ParticipantId,
    pub participant_name: String,
    pub team: TeamKey,
    pub score: i32,
    pub match_point: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Winner {
    Participant { id: ParticipantId, name: String },
    Draw,
}

impl Winner {
    pub fn label(&self) -> &str {
        match self {
            Winner::Participant { name, .. } => name,
            Winner::Draw => DRAW,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, Winner::Draw)
    }
}

impl Serialize for Winner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureRow {
    pub gameweek: GameweekId,
    pub left: FixtureSide,
    pub right: FixtureSide,
    pub winner: Winner,
}

impl FixtureRow {
    /// Team of the winning participant; `None` on a draw.
    pub fn winner_team(&self) -> Option<TeamKey> {
        match &self.winner {
            Winner::Participant { id, .. } if *id == self.left.participant_id => Some(self.left.team),
            Winner::Participant { .. } => Some(self.right.team),
            Winner::Draw => None,
        }
    }

    /// Match points this fixture earned for one team's participants.
    pub fn match_points_for(&self, team: TeamKey) -> u32 {
        [&self.left, &self.right]
            .into_iter()
            .filter(|side| side.team == team)
            .map(|side| side.match_point)
            .sum()
    }

    pub fn involves(&self, id: ParticipantId) -> bool {
        self.left.participant_id == id || self.right.participant_id == id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantSummary {
    pub participant_id: ParticipantId,
    pub participant_name: String,
    pub team: TeamKey,
    pub wins: u32,
    pub total_points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamWeekly {
    pub gameweek: GameweekId,
    pub team: TeamKey,
    pub points: i64,
    pub match_points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamStanding {
    pub team: TeamKey,
    pub match_points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leader {
    Team { team: TeamKey, margin: u32 },
    Tied { match_points: u32 },
}

/// Everything the dashboard shows, recomputed from scratch every fetch cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeagueTables {
    /// One row per gameweek per participant, gameweek-major.
    pub weekly: Vec<WeeklyRow>,
    /// Sorted by gameweek, then left participant name.
    pub fixtures: Vec<FixtureRow>,
    /// Sorted by wins, then total points, both descending; roster order on ties.
    pub participant_summary: Vec<ParticipantSummary>,
    /// Two rows per gameweek, home first.
    pub team_weekly: Vec<TeamWeekly>,
    /// Sorted by match points descending.
    pub scoreboard: Vec<TeamStanding>,
}

impl LeagueTables {
    /// No scoring data anywhere yet.
    pub fn is_pre_season(&self) -> bool {
        self.weekly.iter().map(|row| i64::from(row.points)).sum::<i64>() == 0
    }

    pub fn fixtures_for(&self, gameweek: GameweekId) -> impl Iterator<Item = &FixtureRow> + '_ {
        self.fixtures.iter().filter(move |f| f.gameweek == gameweek)
    }

    pub fn team_weekly_for(&self, gameweek: GameweekId) -> impl Iterator<Item = &TeamWeekly> + '_ {
        self.team_weekly.iter().filter(move |t| t.gameweek == gameweek)
    }

    /// Total points across all participants, per gameweek.
    pub fn weekly_totals(&self) -> BTreeMap<GameweekId, i64> {
        let mut totals = BTreeMap::new();
        for row in &self.weekly {
            *totals.entry(row.gameweek).or_insert(0) += i64::from(row.points);
        }
        totals
    }

    pub fn standing(&self, team: TeamKey) -> u32 {
        self.scoreboard
            .iter()
            .find(|s| s.team == team)
            .map(|s| s.match_points)
            .unwrap_or(0)
    }

    pub fn leader(&self) -> Leader {
        let home = self.standing(TeamKey::Home);
        let away = self.standing(TeamKey::Away);
        match home.cmp(&away) {
            std::cmp::Ordering::Greater => Leader::Team { team: TeamKey::Home, margin: home - away },
            std::cmp::Ordering::Less => Leader::Team { team: TeamKey::Away, margin: away - home },
            std::cmp::Ordering::Equal => Leader::Tied { match_points: home },
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Join raw per-participant points against the schedule and derive every table.
/// Pure: identical inputs always give identical output.
pub fn aggregate(roster: &Roster, schedule: &ScheduleTable, points: &PointsByParticipant) -> LeagueTables {
    let weekly = weekly_table(roster, schedule, points);
    let fixtures = fixtures_table(roster, schedule, &weekly);
    let participant_summary = participant_summary(roster, &weekly, &fixtures);
    let team_weekly = team_weekly_table(schedule, &weekly, &fixtures);
    let scoreboard = team_scoreboard(&team_weekly);

    LeagueTables { weekly, fixtures, participant_summary, team_weekly, scoreboard }
}

fn weekly_table(roster: &Roster, schedule: &ScheduleTable, points: &PointsByParticipant) -> Vec<WeeklyRow> {
    let mut rows = Vec::with_capacity(roster.len() * schedule.gameweek_count() as usize);
    for gameweek in schedule.gameweeks() {
        for p in roster.participants() {
            let points = points
                .get(&p.id)
                .and_then(|by_gw| by_gw.get(&gameweek))
                .copied()
                .unwrap_or(0);
            rows.push(WeeklyRow {
                gameweek,
                participant_id: p.id,
                participant_name: p.name.clone(),
                team: p.team,
                points,
            });
        }
    }
    rows
}

fn fixtures_table(roster: &Roster, schedule: &ScheduleTable, weekly: &[WeeklyRow]) -> Vec<FixtureRow> {
    let scores: HashMap<(ParticipantId, GameweekId), i32> = weekly
        .iter()
        .map(|row| ((row.participant_id, row.gameweek), row.points))
        .collect();
    let score = |id: ParticipantId, gw: GameweekId| scores.get(&(id, gw)).copied().unwrap_or(0);

    let mut rows: Vec<FixtureRow> = schedule
        .iter()
        .filter_map(|(gameweek, pairing)| {
            let (Some(left), Some(right)) =
                (roster.participant(pairing.left), roster.participant(pairing.right))
            else {
                warn!("GW{gameweek}: fixture {} v {} is not on the roster", pairing.left, pairing.right);
                return None;
            };
            let left_score = score(left.id, gameweek);
            let right_score = score(right.id, gameweek);
            let resolution = resolve(left_score, right_score);
            let winner = match resolution.outcome {
                Outcome::LeftWin => winner_of(left),
                Outcome::RightWin => winner_of(right),
                Outcome::Draw => Winner::Draw,
            };
            Some(FixtureRow {
                gameweek,
                left: side(left, left_score, resolution.left_match_point),
                right: side(right, right_score, resolution.right_match_point),
                winner,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        a.gameweek
            .cmp(&b.gameweek)
            .then_with(|| a.left.participant_name.cmp(&b.left.participant_name))
    });
    rows
}

fn side(p: &Participant, score: i32, match_point: u32) -> FixtureSide {
    FixtureSide {
        participant_id: p.id,
        participant_name: p.name.clone(),
        team: p.team,
        score,
        match_point,
    }
}

fn winner_of(p: &Participant) -> Winner {
    Winner::Participant { id: p.id, name: p.name.clone() }
}

fn participant_summary(roster: &Roster, weekly: &[WeeklyRow], fixtures: &[FixtureRow]) -> Vec<ParticipantSummary> {
    let mut rows: Vec<ParticipantSummary> = roster
        .participants()
        .iter()
        .map(|p| {
            let wins = fixtures
                .iter()
                .filter(|f| f.involves(p.id))
                .map(|f| {
                    let mut mp = 0;
                    if f.left.participant_id == p.id {
                        mp += f.left.match_point;
                    }
                    if f.right.participant_id == p.id {
                        mp += f.right.match_point;
                    }
                    mp
                })
                .sum();
            let total_points = weekly
                .iter()
                .filter(|row| row.participant_id == p.id)
                .map(|row| i64::from(row.points))
                .sum();
            ParticipantSummary {
                participant_id: p.id,
                participant_name: p.name.clone(),
                team: p.team,
                wins,
                total_points,
            }
        })
        .collect();

    // Stable sort keeps roster order for full ties.
    rows.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.total_points.cmp(&a.total_points))
    });
    rows
}

fn team_weekly_table(schedule: &ScheduleTable, weekly: &[WeeklyRow], fixtures: &[FixtureRow]) -> Vec<TeamWeekly> {
    let mut rows = Vec::with_capacity(schedule.gameweek_count() as usize * TeamKey::ALL.len());
    for gameweek in schedule.gameweeks() {
        for team in TeamKey::ALL {
            let points = weekly
                .iter()
                .filter(|row| row.gameweek == gameweek && row.team == team)
                .map(|row| i64::from(row.points))
                .sum();
            let match_points = fixtures
                .iter()
                .filter(|f| f.gameweek == gameweek)
                .map(|f| f.match_points_for(team))
                .sum();
            rows.push(TeamWeekly { gameweek, team, points, match_points });
        }
    }
    rows
}

fn team_scoreboard(team_weekly: &[TeamWeekly]) -> Vec<TeamStanding> {
    let mut rows: Vec<TeamStanding> = TeamKey::ALL
        .into_iter()
        .map(|team| TeamStanding {
            team,
            match_points: team_weekly
                .iter()
                .filter(|t| t.team == team)
                .map(|t| t.match_points)
                .sum(),
        })
        .collect();
    rows.sort_by(|a, b| b.match_points.cmp(&a.match_points));
    rows
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::builtin;
    use crate::league::roster::Team;
    use fpl_api::GameweekPoints;

    fn two_player_league() -> (Roster, ScheduleTable) {
        let team = |name: &str| Team { key: TeamKey::Home, name: name.into(), color: "#000000".into() };
        let roster = Roster::new(
            team("Team1"),
            team("Team2"),
            vec![
                Participant { id: 1, name: "A".into(), team: TeamKey::Home },
                Participant { id: 2, name: "B".into(), team: TeamKey::Away },
            ],
        )
        .unwrap();
        let schedule = ScheduleTable::from_names(&roster, &[(1, &[("A", "B")])]).unwrap();
        (roster, schedule)
    }

    fn points(entries: &[(ParticipantId, &[(GameweekId, i32)])]) -> PointsByParticipant {
        entries
            .iter()
            .map(|&(id, gws)| (id, gws.iter().copied().collect::<GameweekPoints>()))
            .collect()
    }

    /// Deterministic, varied scores for the built-in league, ties included.
    fn season_points(roster: &Roster, weeks: GameweekId) -> PointsByParticipant {
        roster
            .ids()
            .enumerate()
            .map(|(i, id)| {
                let by_gw: GameweekPoints = (1..=weeks)
                    .map(|gw| (gw, ((gw as i32 * 37 + i as i32 * 11) % 23) * 3 - 4))
                    .collect();
                (id, by_gw)
            })
            .collect()
    }

    #[test]
    fn higher_score_takes_the_match_point() {
        let (roster, schedule) = two_player_league();
        let tables = aggregate(&roster, &schedule, &points(&[(1, &[(1, 5)]), (2, &[(1, 3)])]));

        let fixture = &tables.fixtures[0];
        assert_eq!(fixture.winner, Winner::Participant { id: 1, name: "A".into() });
        assert_eq!(fixture.left.match_point, 1);
        assert_eq!(fixture.right.match_point, 0);
        assert_eq!(fixture.winner_team(), Some(TeamKey::Home));
        assert_eq!(tables.standing(TeamKey::Home), 1);
        assert_eq!(tables.standing(TeamKey::Away), 0);
        assert_eq!(tables.leader(), Leader::Team { team: TeamKey::Home, margin: 1 });
        assert!(!tables.is_pre_season());
    }

    #[test]
    fn zero_zero_is_a_pre_season_draw() {
        let (roster, schedule) = two_player_league();
        for source in [points(&[(1, &[(1, 0)]), (2, &[(1, 0)])]), PointsByParticipant::new()] {
            let tables = aggregate(&roster, &schedule, &source);
            assert!(tables.is_pre_season());
            assert_eq!(tables.fixtures[0].winner, Winner::Draw);
            assert_eq!(tables.fixtures[0].winner.label(), DRAW);
            assert_eq!(tables.fixtures[0].winner_team(), None);
            assert_eq!(tables.standing(TeamKey::Home), 0);
            assert_eq!(tables.standing(TeamKey::Away), 0);
            assert_eq!(tables.leader(), Leader::Tied { match_points: 0 });
        }
    }

    #[test]
    fn weekly_table_has_one_row_per_participant_and_gameweek() {
        let league = builtin::fpl_geese_vs_bbbsas().unwrap();
        let source = points(&[(3544410, &[(1, 61), (4, 48)]), (454394, &[(18, 90)])]);
        let tables = league.aggregate(&source);

        let n = league.gameweek_count();
        assert_eq!(tables.weekly.len(), league.roster.len() * n as usize);
        for gw in 1..=n {
            for p in league.roster.participants() {
                let rows: Vec<_> = tables
                    .weekly
                    .iter()
                    .filter(|r| r.gameweek == gw && r.participant_id == p.id)
                    .collect();
                assert_eq!(rows.len(), 1, "gw {gw} participant {}", p.name);
                let expected = source.get(&p.id).and_then(|m| m.get(&gw)).copied().unwrap_or(0);
                assert_eq!(rows[0].points, expected);
            }
        }
    }

    #[test]
    fn points_outside_the_season_are_ignored() {
        let (roster, schedule) = two_player_league();
        let tables = aggregate(&roster, &schedule, &points(&[(1, &[(2, 80), (38, 12)])]));
        assert_eq!(tables.weekly.len(), 2);
        assert!(tables.is_pre_season());
    }

    #[test]
    fn fixtures_are_sorted_by_gameweek_then_left_name() {
        let league = builtin::fpl_geese_vs_bbbsas().unwrap();
        let tables = league.aggregate(&PointsByParticipant::new());
        assert_eq!(tables.fixtures.len(), 18 * 3);
        for pair in tables.fixtures.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                (a.gameweek, &a.left.participant_name) <= (b.gameweek, &b.left.participant_name),
                "{a:?} before {b:?}"
            );
        }
        let first: Vec<_> = tables.fixtures_for(1).map(|f| f.left.participant_name.as_str()).collect();
        assert_eq!(first, ["Frej", "Pat", "Tommi"]);
    }

    #[test]
    fn every_fixture_awards_at_most_one_point() {
        let league = builtin::fpl_geese_vs_bbbsas().unwrap();
        let tables = league.aggregate(&season_points(&league.roster, 18));
        for f in &tables.fixtures {
            if f.left.score == f.right.score {
                assert_eq!((f.left.match_point, f.right.match_point), (0, 0));
                assert!(f.winner.is_draw());
            } else {
                assert_eq!(f.left.match_point + f.right.match_point, 1);
                let higher = if f.left.score > f.right.score { &f.left } else { &f.right };
                assert_eq!(higher.match_point, 1);
                assert_eq!(f.winner.label(), higher.participant_name);
            }
        }
        for gw in league.schedule.gameweeks() {
            let awarded: u32 = tables.team_weekly_for(gw).map(|t| t.match_points).sum();
            assert!(awarded as usize <= league.schedule.pairs_for(gw).len());
        }
    }

    #[test]
    fn scoreboard_matches_team_weekly_totals() {
        let league = builtin::fpl_geese_vs_bbbsas().unwrap();
        let tables = league.aggregate(&season_points(&league.roster, 12));
        for team in TeamKey::ALL {
            let from_weekly: u32 = tables
                .team_weekly
                .iter()
                .filter(|t| t.team == team)
                .map(|t| t.match_points)
                .sum();
            assert_eq!(tables.standing(team), from_weekly);
        }
        assert!(tables.scoreboard[0].match_points >= tables.scoreboard[1].match_points);
    }

    #[test]
    fn team_weekly_has_two_rows_per_gameweek() {
        let league = builtin::fpl_geese_vs_bbbsas().unwrap();
        let tables = league.aggregate(&season_points(&league.roster, 18));
        assert_eq!(tables.team_weekly.len(), 18 * 2);
        for gw in league.schedule.gameweeks() {
            let rows: Vec<_> = tables.team_weekly_for(gw).collect();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].team, TeamKey::Home);
            assert_eq!(rows[1].team, TeamKey::Away);

            let expected: i64 = tables
                .weekly
                .iter()
                .filter(|r| r.gameweek == gw && r.team == TeamKey::Home)
                .map(|r| i64::from(r.points))
                .sum();
            assert_eq!(rows[0].points, expected);
        }
    }

    #[test]
    fn summary_sorts_by_wins_then_points_then_roster_order() {
        let league = builtin::fpl_geese_vs_bbbsas().unwrap();
        // GW1: Frej v Phil, Tommi v Max, Pat v Torsten.
        let source = points(&[
            (454394, &[(1, 70)]),  // Frej beats Phil
            (727945, &[(1, 20)]),
            (1584965, &[(1, 50)]), // Tommi beats Max
            (5508333, &[(1, 40)]),
        ]);
        let tables = league.aggregate(&source);
        let order: Vec<_> = tables
            .participant_summary
            .iter()
            .map(|s| (s.participant_name.as_str(), s.wins, s.total_points))
            .collect();
        assert_eq!(
            order,
            [
                ("Frej", 1, 70),
                ("Tommi", 1, 50),
                ("Max", 0, 40),
                ("Phil", 0, 20),
                // Torsten and Pat: no points, roster order.
                ("Torsten", 0, 0),
                ("Pat", 0, 0),
            ]
        );
    }

    #[test]
    fn summary_wins_count_both_sides() {
        let league = builtin::fpl_geese_vs_bbbsas().unwrap();
        let tables = league.aggregate(&season_points(&league.roster, 18));
        for s in &tables.participant_summary {
            let expected: u32 = tables
                .fixtures
                .iter()
                .filter(|f| f.involves(s.participant_id))
                .map(|f| {
                    if f.left.participant_id == s.participant_id {
                        f.left.match_point
                    } else {
                        f.right.match_point
                    }
                })
                .sum();
            assert_eq!(s.wins, expected, "{}", s.participant_name);
        }
    }

    #[test]
    fn aggregation_is_idempotent() {
        let league = builtin::fpl_geese_vs_bbbsas().unwrap();
        let source = season_points(&league.roster, 9);
        assert_eq!(league.aggregate(&source), league.aggregate(&source));
    }

    #[test]
    fn negative_totals_still_count_as_in_season() {
        let (roster, schedule) = two_player_league();
        let tables = aggregate(&roster, &schedule, &points(&[(1, &[(1, -4)])]));
        assert!(!tables.is_pre_season());
        assert_eq!(tables.fixtures[0].winner.label(), "B");
        assert_eq!(tables.weekly_totals()[&1], -4);
    }

    #[test]
    fn winner_serializes_as_name_or_draw() {
        let (roster, schedule) = two_player_league();
        let tables = aggregate(&roster, &schedule, &points(&[(2, &[(1, 9)])]));
        let json = serde_json::to_value(&tables.fixtures[0]).unwrap();
        assert_eq!(json["winner"], "B");
        assert_eq!(json["right"]["team"], "away");

        let tables = aggregate(&roster, &schedule, &PointsByParticipant::new());
        let json = serde_json::to_value(&tables.fixtures[0]).unwrap();
        assert_eq!(json["winner"], DRAW);
    }
}
