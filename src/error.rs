// Error types for schedule generation
// Every variant is a contract violation detected before any week is built

/// Error type for building divisions, leagues, and seasons.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// Returned when a division is empty or has an even number of teams.
    #[error("division '{division}' has {size} teams; the circle method needs an odd, non-zero count")]
    InvalidDivisionSize {
        /// Name of the offending division.
        division: String,
        /// Number of teams it holds.
        size: usize,
    },

    /// Returned when the two divisions of a league differ in size.
    #[error("divisions differ in size: {first} vs {second}")]
    DivisionSizeMismatch {
        /// Size of the first division.
        first: usize,
        /// Size of the second division.
        second: usize,
    },

    /// Returned when the season layout does not support the division size.
    #[error("season layout needs {expected} teams per division, got {size}")]
    UnsupportedDivisionSize {
        /// Teams per division the layout is built for.
        expected: usize,
        /// Teams per division that were supplied.
        size: usize,
    },

    /// Returned when a sit-out index is outside the division.
    #[error("sit-out index {index} is out of range for a division of {size} teams")]
    InvalidSitOutIndex {
        /// The invalid index.
        index: usize,
        /// Number of teams in the division.
        size: usize,
    },

    /// Returned when a team name appears twice in one division.
    #[error("team '{team}' appears more than once in division '{division}'")]
    DuplicateTeam {
        /// The repeated team.
        team: String,
        /// Division holding the duplicate.
        division: String,
    },

    /// Returned when a team name appears in both divisions.
    #[error("team '{team}' appears in both divisions")]
    TeamInBothDivisions {
        /// The shared team.
        team: String,
    },

    /// Returned when a team name is empty or only whitespace.
    #[error("division '{division}' contains a blank team name")]
    BlankTeamName {
        /// Division holding the blank entry.
        division: String,
    },
}
