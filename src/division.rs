// Divisions, the two-division league, and the circle-method pairing used
// to build each week's in-division games.
//
// Picture the teams of a division seated around a round table in order.
// The team sitting out plays outside the division that week; the teams
// immediately to its left and right play each other, then the next two out,
// and so on until everyone else is paired.

use serde::Serialize;
use std::collections::HashSet;

use crate::error::ScheduleError;
use crate::game::{Game, Team};

/// An ordered, odd-sized group of distinct teams.
/// The order is the seating order around the table, not a display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Division {
    pub name: String,
    teams: Vec<Team>,
}

impl Division {
    pub fn new(name: &str, teams: Vec<Team>) -> Result<Division, ScheduleError> {
        if teams.is_empty() || teams.len() % 2 == 0 {
            return Err(ScheduleError::InvalidDivisionSize {
                division: name.to_string(),
                size: teams.len(),
            });
        }

        let mut seen: HashSet<&Team> = HashSet::with_capacity(teams.len());
        for team in &teams {
            if team.name().trim().is_empty() {
                return Err(ScheduleError::BlankTeamName {
                    division: name.to_string(),
                });
            }
            if !seen.insert(team) {
                return Err(ScheduleError::DuplicateTeam {
                    team: team.to_string(),
                    division: name.to_string(),
                });
            }
        }

        Ok(Division {
            name: name.to_string(),
            teams,
        })
    }

    /// Convenience constructor from plain names
    #[cfg(test)]
    pub fn from_names(name: &str, names: &[&str]) -> Result<Division, ScheduleError> {
        Division::new(name, names.iter().map(|n| Team::new(n)).collect())
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn contains(&self, team: &Team) -> bool {
        self.teams.contains(team)
    }

    /// Team at `index`, wrapping around the table
    pub fn team_at(&self, index: usize) -> &Team {
        &self.teams[index % self.teams.len()]
    }

    /// One round of the circle method.
    ///
    /// For i in 1..=(n-1)/2 the team i seats clockwise of the sit-out team
    /// plays the team i seats counter-clockwise. `parity` true makes the
    /// clockwise team the host.
    pub fn round_robin_pairs(&self, sit_out: usize, parity: bool) -> Result<Vec<Game>, ScheduleError> {
        let num_teams = self.teams.len();
        if sit_out >= num_teams {
            return Err(ScheduleError::InvalidSitOutIndex {
                index: sit_out,
                size: num_teams,
            });
        }

        let num_pairs = (num_teams - 1) / 2;
        let games = (1..=num_pairs)
            .map(|offset| {
                let clockwise = &self.teams[(sit_out + offset) % num_teams];
                let counter_clockwise = &self.teams[(sit_out + num_teams - offset) % num_teams];
                Game::with_parity(clockwise, counter_clockwise, parity)
            })
            .collect();

        Ok(games)
    }
}

/// The two divisions that make up a season
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct League {
    pub first: Division,
    pub second: Division,
}

impl League {
    /// Pair two divisions, rejecting unequal sizes and shared teams
    pub fn new(first: Division, second: Division) -> Result<League, ScheduleError> {
        if first.len() != second.len() {
            return Err(ScheduleError::DivisionSizeMismatch {
                first: first.len(),
                second: second.len(),
            });
        }

        if let Some(shared) = first.teams().iter().find(|t| second.contains(t)) {
            return Err(ScheduleError::TeamInBothDivisions {
                team: shared.to_string(),
            });
        }

        Ok(League { first, second })
    }

    pub fn teams_per_division(&self) -> usize {
        self.first.len()
    }

    /// Every team, first division then second, in seating order
    pub fn all_teams(&self) -> impl Iterator<Item = &Team> {
        self.first.teams().iter().chain(self.second.teams().iter())
    }

    pub fn contains(&self, team: &Team) -> bool {
        self.first.contains(team) || self.second.contains(team)
    }

    /// Returns true if both teams sit in the same division
    pub fn same_division(&self, a: &Team, b: &Team) -> bool {
        self.first.contains(a) == self.first.contains(b)
    }
}
