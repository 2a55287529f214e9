// Sequences the whole season:
// two weird weeks (cross-division offsets 0 and 1), then three sets of five
// normal weeks using cross-division offsets 2, 3 and 4. Home/away flips
// between sets, never within one, which gives every team a 2-1 / 1-2 split
// against its division rivals.

use serde::Serialize;
use tracing::debug;

use crate::division::League;
use crate::error::ScheduleError;
use crate::game::{Game, Matchup};
use crate::week::{normal_week, weird_week, Week};

/// Teams per division the season layout is built for
pub const TEAMS_PER_DIVISION: usize = 5;

/// Number of weeks with only cross-division games
pub const WEIRD_WEEKS: usize = 2;

/// Number of five-week sets of normal weeks
pub const NORMAL_SETS: usize = 3;

/// Total weeks in a season (2 weird + 3 sets of 5 normal)
pub const WEEKS_PER_SEASON: usize = WEIRD_WEEKS + NORMAL_SETS * TEAMS_PER_DIVISION;

/// An immutable, ordered season of weeks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Season {
    weeks: Vec<Week>,
}

impl Season {
    /// Build the full season for a league.
    /// Fails before building anything if the divisions do not have five teams.
    pub fn generate(league: &League) -> Result<Season, ScheduleError> {
        let size = league.teams_per_division();
        if size != TEAMS_PER_DIVISION {
            return Err(ScheduleError::UnsupportedDivisionSize {
                expected: TEAMS_PER_DIVISION,
                size,
            });
        }

        let mut weeks: Vec<Week> = Vec::with_capacity(WEEKS_PER_SEASON);
        for ordinal in 0..WEIRD_WEEKS {
            weeks.push(weird_week(ordinal, league));
        }

        for set_number in 0..NORMAL_SETS {
            // Flop the parity so the second set's home/away mirrors the first and third
            let parity = set_number % 2 == 1;
            let division_offset = WEIRD_WEEKS + set_number;
            debug!(set_number, division_offset, parity, "building normal week set");

            for week_index in 0..TEAMS_PER_DIVISION {
                let title = format!("Normal Week #{}", set_number * TEAMS_PER_DIVISION + week_index + 1);
                weeks.push(normal_week(week_index, league, division_offset, parity, title)?);
            }
        }

        debug!(weeks = weeks.len(), "season generated");
        Ok(Season { weeks })
    }

    /// Wrap hand-built weeks, skipping generation
    #[cfg(test)]
    pub(crate) fn from_weeks(weeks: Vec<Week>) -> Season {
        Season { weeks }
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    /// Every game in week order, then game order
    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.weeks.iter().flat_map(|w| w.games.iter())
    }

    /// The hand-off form: one list of {home, away} pairs per week
    pub fn matchups(&self) -> Vec<Vec<Matchup>> {
        self.weeks.iter().map(Week::matchups).collect()
    }
}
