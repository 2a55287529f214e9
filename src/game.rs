// This module defines the basic records of a schedule: teams, games, and the
// plain {home, away} matchups handed to the output and upload steps

use serde::{Deserialize, Serialize};
use std::fmt;

/// A team, identified only by its name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Team(String);

impl Team {
    pub fn new(name: &str) -> Self {
        Team(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single scheduled game between two teams
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub home: Team,
    pub away: Team,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Game {
    pub fn new(home: Team, away: Team) -> Self {
        Game {
            home,
            away,
            title: None,
        }
    }

    /// Build a game where `parity` decides who hosts:
    /// true puts `team1` at home, false puts `team2` at home
    pub fn with_parity(team1: &Team, team2: &Team, parity: bool) -> Self {
        if parity {
            Game::new(team1.clone(), team2.clone())
        } else {
            Game::new(team2.clone(), team1.clone())
        }
    }

    /// Returns true if `team` plays in this game
    pub fn involves(&self, team: &Team) -> bool {
        self.home == *team || self.away == *team
    }

    pub fn to_matchup(&self) -> Matchup {
        Matchup {
            home: self.home.clone(),
            away: self.away.clone(),
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.away, self.home)
    }
}

/// Home/away pair as persisted in the matchups file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    pub home: Team,
    pub away: Team,
}
