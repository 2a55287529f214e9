// Per-team statistics over a finished season, used to sanity check that
// each team's schedule is as expected before anything gets written out.
// Aggregation only reads the season; nothing here can change a schedule.

use fnv::{FnvHashMap, FnvHashSet};

use crate::division::{Division, League};
use crate::game::{Game, Team};
use crate::season::{Season, NORMAL_SETS, WEEKS_PER_SEASON};

/// Aggregate view of one team's schedule
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamReport {
    pub home: usize,
    pub total: usize,
    pub in_division: usize,
    pub opponents: FnvHashSet<Team>,
}

impl TeamReport {
    fn augment_with_game(&mut self, is_home: bool, is_in_division: bool, opponent: &Team) {
        if is_home {
            self.home += 1;
        }
        if is_in_division {
            self.in_division += 1;
        }
        self.total += 1;
        self.opponents.insert(opponent.clone());
    }
}

/// Aggregate view of every team's schedule in a season
#[derive(Debug, Clone, Default)]
pub struct Report {
    by_team: FnvHashMap<Team, TeamReport>,
    /// (home, away) -> number of games with that orientation
    hosted: FnvHashMap<(Team, Team), usize>,
}

impl Report {
    /// Aggregate a season. Membership of `first_division` decides which
    /// games count as in-division: both teams inside it, or both outside.
    pub fn from_season(season: &Season, first_division: &Division) -> Report {
        let mut report = Report::default();
        for game in season.games() {
            report.add_game(game, first_division);
        }
        report
    }

    fn add_game(&mut self, game: &Game, first_division: &Division) {
        let is_same = first_division.contains(&game.home) == first_division.contains(&game.away);

        self.by_team
            .entry(game.home.clone())
            .or_default()
            .augment_with_game(true, is_same, &game.away);
        self.by_team
            .entry(game.away.clone())
            .or_default()
            .augment_with_game(false, is_same, &game.home);

        *self
            .hosted
            .entry((game.home.clone(), game.away.clone()))
            .or_insert(0) += 1;
    }

    pub fn team(&self, team: &Team) -> Option<&TeamReport> {
        self.by_team.get(team)
    }

    /// Number of games `home` hosted against `away`
    pub fn hosted(&self, home: &Team, away: &Team) -> usize {
        self.hosted
            .get(&(home.clone(), away.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Number of games between two teams, either way round
    pub fn meetings(&self, a: &Team, b: &Team) -> usize {
        self.hosted(a, b) + self.hosted(b, a)
    }

    /// Compare the aggregates against what a league's season must look like
    pub fn check(&self, league: &League) -> Vec<Violation> {
        let mut violations = Vec::new();
        let rivals = league.teams_per_division() - 1;
        let expected_in_division = rivals * NORMAL_SETS;
        let expected_opponents = rivals + league.teams_per_division();

        for team in self.by_team.keys() {
            if !league.contains(team) {
                violations.push(Violation::UnknownTeam { team: team.clone() });
            }
        }

        for team in league.all_teams() {
            let Some(info) = self.by_team.get(team) else {
                violations.push(Violation::MissingTeam { team: team.clone() });
                continue;
            };

            if info.total != WEEKS_PER_SEASON {
                violations.push(Violation::GameCount {
                    team: team.clone(),
                    expected: WEEKS_PER_SEASON,
                    actual: info.total,
                });
            }
            if info.in_division != expected_in_division {
                violations.push(Violation::InDivisionCount {
                    team: team.clone(),
                    expected: expected_in_division,
                    actual: info.in_division,
                });
            }
            if info.opponents.len() != expected_opponents {
                violations.push(Violation::OpponentCount {
                    team: team.clone(),
                    expected: expected_opponents,
                    actual: info.opponents.len(),
                });
            }

            let mut hosting_majority = 0;
            for other in league.all_teams().filter(|o| *o != team) {
                let same = league.same_division(team, other);
                let expected = if same { NORMAL_SETS } else { 1 };
                let actual = self.meetings(team, other);
                if actual != expected {
                    violations.push(Violation::MeetingCount {
                        team: team.clone(),
                        opponent: other.clone(),
                        expected,
                        actual,
                    });
                    continue;
                }
                if !same {
                    continue;
                }

                let home = self.hosted(team, other);
                let away = actual - home;
                if home == 0 || away == 0 {
                    violations.push(Violation::HomeSplit {
                        team: team.clone(),
                        opponent: other.clone(),
                        home,
                        away,
                    });
                } else if home > away {
                    hosting_majority += 1;
                }
            }

            if hosting_majority * 2 != rivals {
                violations.push(Violation::UnbalancedRivalSplits {
                    team: team.clone(),
                    hosting_majority,
                    rivals,
                });
            }
        }

        violations
    }

    /// One line per team, in league order
    pub fn sanity_lines(&self, league: &League) -> String {
        let mut out = String::new();
        for team in league.all_teams() {
            let info = self.team(team).cloned().unwrap_or_default();
            out.push_str(&format!(
                "{}: home: {}, in_div: {}, opps: {}; total {}\n",
                team,
                info.home,
                info.in_division,
                info.opponents.len(),
                info.total
            ));
        }
        out
    }
}

/// Checks that each week gives every team exactly one game
pub fn check_weeks(season: &Season, league: &League) -> Vec<Violation> {
    let mut violations = Vec::new();
    for week in season.weeks() {
        let mut appearances: FnvHashMap<&Team, usize> = FnvHashMap::default();
        for game in &week.games {
            if game.home == game.away {
                violations.push(Violation::SelfGame {
                    week: week.title.clone(),
                    team: game.home.clone(),
                });
            }
            *appearances.entry(&game.home).or_insert(0) += 1;
            *appearances.entry(&game.away).or_insert(0) += 1;
        }

        for team in league.all_teams() {
            match appearances.get(team).copied().unwrap_or(0) {
                1 => {}
                0 => violations.push(Violation::IdleTeam {
                    week: week.title.clone(),
                    team: team.clone(),
                }),
                _ => violations.push(Violation::DoubleBooked {
                    week: week.title.clone(),
                    team: team.clone(),
                }),
            }
        }
    }
    violations
}

/// Full verification of a season: weekly slates plus season aggregates
pub fn validate(season: &Season, league: &League) -> Vec<Violation> {
    let mut violations = check_weeks(season, league);
    violations.extend(Report::from_season(season, &league.first).check(league));
    violations
}

/// A broken schedule invariant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("{team} is in the schedule but not in either division")]
    UnknownTeam { team: Team },

    #[error("{team} never plays")]
    MissingTeam { team: Team },

    #[error("{team} plays {actual} games, expected {expected}")]
    GameCount { team: Team, expected: usize, actual: usize },

    #[error("{team} plays {actual} division games, expected {expected}")]
    InDivisionCount { team: Team, expected: usize, actual: usize },

    #[error("{team} faces {actual} distinct opponents, expected {expected}")]
    OpponentCount { team: Team, expected: usize, actual: usize },

    #[error("{team} meets {opponent} {actual} times, expected {expected}")]
    MeetingCount {
        team: Team,
        opponent: Team,
        expected: usize,
        actual: usize,
    },

    #[error("{team} hosts {opponent} {home} times and visits {away} times")]
    HomeSplit {
        team: Team,
        opponent: Team,
        home: usize,
        away: usize,
    },

    #[error("{team} hosts the majority against {hosting_majority} of {rivals} rivals, expected half")]
    UnbalancedRivalSplits {
        team: Team,
        hosting_majority: usize,
        rivals: usize,
    },

    #[error("{week}: {team} plays itself")]
    SelfGame { week: String, team: Team },

    #[error("{week}: {team} has no game")]
    IdleTeam { week: String, team: Team },

    #[error("{week}: {team} is scheduled more than once")]
    DoubleBooked { week: String, team: Team },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::week::Week;

    fn league() -> League {
        League::new(
            Division::from_names("Wales", &["Steamers", "Army", "Breakfast Kings", "Loonies", "Magoons"]).unwrap(),
            Division::from_names("Campbell", &["Pleased", "Zaus", "Poachers", "Pants", "Cold Necks"]).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_every_team_report_is_as_expected() {
        let league = league();
        let season = Season::generate(&league).unwrap();
        let report = Report::from_season(&season, &league.first);

        for team in league.all_teams() {
            let info = report.team(team).unwrap();
            assert_eq!(info.total, 17);
            assert_eq!(info.in_division, 12);
            assert_eq!(info.opponents.len(), 9);
        }
    }

    #[test]
    fn test_home_counts() {
        let league = league();
        let season = Season::generate(&league).unwrap();
        let report = Report::from_season(&season, &league.first);

        // Weird week #1 and the first and third normal sets host the second division
        for team in league.first.teams() {
            assert_eq!(report.team(team).unwrap().home, 8);
        }
        for team in league.second.teams() {
            assert_eq!(report.team(team).unwrap().home, 9);
        }
        for team in league.all_teams() {
            let division_home: usize = league
                .all_teams()
                .filter(|r| *r != team && league.same_division(team, r))
                .map(|r| report.hosted(team, r))
                .sum();
            assert_eq!(division_home, 6);
        }
    }

    #[test]
    fn test_generated_season_has_no_violations() {
        let league = league();
        let season = Season::generate(&league).unwrap();
        assert_eq!(validate(&season, &league), Vec::new());
    }

    #[test]
    fn test_aggregation_leaves_season_untouched() {
        let league = league();
        let season = Season::generate(&league).unwrap();
        let before = season.clone();
        let _ = Report::from_season(&season, &league.first);
        let _ = validate(&season, &league);
        assert_eq!(season, before);
    }

    #[test]
    fn test_check_flags_wrong_league() {
        let league = league();
        let season = Season::generate(&league).unwrap();
        let report = Report::from_season(&season, &league.first);

        // Swap one team out; it never plays and the real team is unknown
        let other = League::new(
            Division::from_names("Wales", &["Steamers", "Army", "Breakfast Kings", "Loonies", "Ghosts"]).unwrap(),
            league.second.clone(),
        )
        .unwrap();
        let violations = report.check(&other);
        assert!(violations.contains(&Violation::MissingTeam { team: Team::new("Ghosts") }));
        assert!(violations.contains(&Violation::UnknownTeam { team: Team::new("Magoons") }));
        assert!(!check_weeks(&season, &other).is_empty());
    }

    fn generated_weeks(league: &League) -> Vec<Week> {
        Season::generate(league).unwrap().weeks().to_vec()
    }

    #[test]
    fn test_unflipped_middle_set_breaks_home_splits() {
        let league = league();
        let mut weeks = generated_weeks(&league);
        // Normal weeks #6 through #10
        for week in &mut weeks[7..12] {
            for game in &mut week.games {
                std::mem::swap(&mut game.home, &mut game.away);
            }
        }
        let season = Season::from_weeks(weeks);

        assert!(check_weeks(&season, &league).is_empty());
        let violations = Report::from_season(&season, &league.first).check(&league);
        let home_splits = violations
            .iter()
            .filter(|v| matches!(v, Violation::HomeSplit { .. }))
            .count();
        let unbalanced = violations
            .iter()
            .filter(|v| matches!(v, Violation::UnbalancedRivalSplits { .. }))
            .count();
        assert_eq!(home_splits, 40);
        assert_eq!(unbalanced, 10);
        assert!(!violations.iter().any(|v| matches!(v, Violation::MeetingCount { .. })));
        assert!(violations.contains(&Violation::UnbalancedRivalSplits {
            team: Team::new("Steamers"),
            hosting_majority: 0,
            rivals: 4,
        }));
    }

    #[test]
    fn test_repeated_weird_week_breaks_meeting_counts() {
        let league = league();
        let mut weeks = generated_weeks(&league);
        weeks[1] = weeks[0].clone();
        let season = Season::from_weeks(weeks);

        assert!(check_weeks(&season, &league).is_empty());
        let violations = Report::from_season(&season, &league.first).check(&league);
        let meetings = violations
            .iter()
            .filter(|v| matches!(v, Violation::MeetingCount { .. }))
            .count();
        assert_eq!(meetings, 20);
        assert!(violations.contains(&Violation::MeetingCount {
            team: Team::new("Steamers"),
            opponent: Team::new("Pleased"),
            expected: 1,
            actual: 2,
        }));
        assert!(violations.contains(&Violation::MeetingCount {
            team: Team::new("Steamers"),
            opponent: Team::new("Zaus"),
            expected: 1,
            actual: 0,
        }));
        assert!(violations.contains(&Violation::OpponentCount {
            team: Team::new("Steamers"),
            expected: 9,
            actual: 8,
        }));
    }

    #[test]
    fn test_double_booked_team_is_flagged() {
        let league = league();
        let mut weeks = generated_weeks(&league);
        let week = &mut weeks[2];
        let intruder = week.games[1].home.clone();
        let idle = week.games[0].away.clone();
        week.games[0].away = intruder.clone();
        let title = week.title.clone();
        let season = Season::from_weeks(weeks);

        let violations = check_weeks(&season, &league);
        assert_eq!(violations.len(), 2);
        assert!(violations.contains(&Violation::DoubleBooked { week: title.clone(), team: intruder }));
        assert!(violations.contains(&Violation::IdleTeam { week: title, team: idle }));
    }

    #[test]
    fn test_team_playing_itself_is_flagged() {
        let league = league();
        let mut weeks = generated_weeks(&league);
        let week = &mut weeks[0];
        let host = week.games[0].home.clone();
        let idle = week.games[0].away.clone();
        week.games[0].away = host.clone();
        let title = week.title.clone();
        let season = Season::from_weeks(weeks);

        let violations = check_weeks(&season, &league);
        assert!(violations.contains(&Violation::SelfGame { week: title.clone(), team: host.clone() }));
        assert!(violations.contains(&Violation::DoubleBooked { week: title.clone(), team: host }));
        assert!(violations.contains(&Violation::IdleTeam { week: title, team: idle }));
        assert!(!validate(&season, &league).is_empty());
    }

    #[test]
    fn test_sanity_lines_format() {
        let league = league();
        let season = Season::generate(&league).unwrap();
        let report = Report::from_season(&season, &league.first);
        let lines = report.sanity_lines(&league);
        assert_eq!(lines.lines().count(), 10);
        assert_eq!(
            lines.lines().next().unwrap(),
            "Steamers: home: 8, in_div: 12, opps: 9; total 17"
        );
    }

    #[test]
    fn test_violation_messages() {
        let v = Violation::HomeSplit {
            team: Team::new("Army"),
            opponent: Team::new("Loonies"),
            home: 3,
            away: 0,
        };
        assert_eq!(v.to_string(), "Army hosts Loonies 3 times and visits 0 times");

        let v = Violation::DoubleBooked {
            week: "Normal Week #4".to_string(),
            team: Team::new("Zaus"),
        };
        assert_eq!(v.to_string(), "Normal Week #4: Zaus is scheduled more than once");
    }
}
