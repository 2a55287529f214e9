// Builds one week's slate of games.
// A weird week only has games between the divisions; a normal week has one
// game between the divisions and a full circle-method round inside each.

use serde::{Deserialize, Serialize};

use crate::division::League;
use crate::error::ScheduleError;
use crate::game::{Game, Matchup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeekKind {
    /// Longer-than-usual week carrying only non-division games
    Weird,
    Normal,
}

/// A titled slate of games, one per pairing of teams
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
    pub title: String,
    pub kind: WeekKind,
    pub games: Vec<Game>,
}

impl Week {
    pub fn matchups(&self) -> Vec<Matchup> {
        self.games.iter().map(Game::to_matchup).collect()
    }
}

/// Weird week number `ordinal` (0-based).
///
/// Team k of the first division meets team (k + ordinal) of the second, so
/// each ordinal uses a different cross-division offset. Odd ordinals put the
/// first division at home.
pub fn weird_week(ordinal: usize, league: &League) -> Week {
    let parity = ordinal % 2 == 1;
    let games = league
        .first
        .teams()
        .iter()
        .enumerate()
        .map(|(k, team)| Game::with_parity(team, league.second.team_at(k + ordinal), parity))
        .collect();

    Week {
        title: format!("Weird Week #{}", ordinal + 1),
        kind: WeekKind::Weird,
        games,
    }
}

/// A normal week.
///
/// `week_index` picks which first-division team plays across; the
/// second-division opponent sits `division_offset` seats further round.
/// Game order is the cross-division game, then the first division's pairs,
/// then the second division's.
pub fn normal_week(
    week_index: usize,
    league: &League,
    division_offset: usize,
    parity: bool,
    title: String,
) -> Result<Week, ScheduleError> {
    let teams_per_division = league.teams_per_division();
    let first_sit_out = week_index % teams_per_division;
    let second_sit_out = (first_sit_out + division_offset) % teams_per_division;

    let mut games = Vec::with_capacity(teams_per_division);
    games.push(Game::with_parity(
        league.first.team_at(first_sit_out),
        league.second.team_at(second_sit_out),
        parity,
    ));
    games.extend(league.first.round_robin_pairs(first_sit_out, parity)?);
    games.extend(league.second.round_robin_pairs(second_sit_out, parity)?);

    Ok(Week {
        title,
        kind: WeekKind::Normal,
        games,
    })
}
