// This file ingests the league's teams from a csv file and turns them into
// the two validated divisions the season is built from.
//
// Expected layout, one team per row, seating order is row order:
//   division,team
//   Wales,Steamers
//   Wales,Army
//   ...
//   Campbell,Pleased

use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::division::{Division, League};
use crate::error::ScheduleError;
use crate::game::Team;

#[derive(Debug, Deserialize)]
struct TeamRow {
    division: String,
    team: String,
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read teams csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("expected exactly 2 divisions in teams csv, found {found}: {names:?}")]
    DivisionCount { found: usize, names: Vec<String> },

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Read a league from a `division,team` csv file
pub fn league_from_csv(path: &Path) -> Result<League, IngestError> {
    info!(path = %path.display(), "reading teams csv");
    let rdr = csv::Reader::from_path(path)?;
    league_from_reader(rdr)
}

/// Read a league from any csv source with a `division,team` header
pub fn league_from_reader<R: Read>(mut rdr: csv::Reader<R>) -> Result<League, IngestError> {
    // Divisions keep the order they first appear in
    let mut divisions: Vec<(String, Vec<Team>)> = Vec::new();

    for result in rdr.deserialize() {
        let row: TeamRow = result?;
        let division = row.division.trim();
        let team = Team::new(row.team.trim());
        match divisions.iter_mut().find(|(name, _)| name == division) {
            Some((_, teams)) => teams.push(team),
            None => divisions.push((division.to_string(), vec![team])),
        }
    }

    if divisions.len() != 2 {
        return Err(IngestError::DivisionCount {
            found: divisions.len(),
            names: divisions.into_iter().map(|(name, _)| name).collect(),
        });
    }

    let mut divisions = divisions.into_iter();
    let (first_name, first_teams) = divisions.next().unwrap_or_default();
    let (second_name, second_teams) = divisions.next().unwrap_or_default();
    debug!(first = %first_name, second = %second_name, "divisions read");

    let league = League::new(
        Division::new(&first_name, first_teams)?,
        Division::new(&second_name, second_teams)?,
    )?;
    Ok(league)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> Result<League, IngestError> {
        league_from_reader(csv::Reader::from_reader(text.as_bytes()))
    }

    #[test]
    fn test_reads_divisions_in_row_order() {
        let league = read(
            "division,team\n\
             Wales,Steamers\nWales,Army\nCampbell,Pleased\nWales,Loonies\n\
             Campbell,Zaus\nCampbell,Poachers\n",
        )
        .unwrap();
        assert_eq!(league.first.name, "Wales");
        assert_eq!(league.second.name, "Campbell");
        let names: Vec<&str> = league.first.teams().iter().map(Team::name).collect();
        assert_eq!(names, vec!["Steamers", "Army", "Loonies"]);
    }

    #[test]
    fn test_trims_whitespace() {
        let league = read("division,team\n A , x \nA,y\nA,z\nB,p\nB,q\nB,r\n").unwrap();
        assert_eq!(league.first.name, "A");
        assert_eq!(league.first.teams()[0], Team::new("x"));
    }

    #[test]
    fn test_rejects_wrong_division_count() {
        let err = read("division,team\nA,x\nB,y\nC,z\n").unwrap_err();
        assert!(matches!(err, IngestError::DivisionCount { found: 3, .. }));
    }

    #[test]
    fn test_surfaces_schedule_errors() {
        let err = read("division,team\nA,x\nA,y\nA,z\nB,x\nB,q\nB,r\n").unwrap_err();
        assert!(matches!(
            err,
            IngestError::Schedule(ScheduleError::TeamInBothDivisions { .. })
        ));

        let err = read("division,team\nA,x\nA,y\nB,p\nB,q\n").unwrap_err();
        assert!(matches!(
            err,
            IngestError::Schedule(ScheduleError::InvalidDivisionSize { size: 2, .. })
        ));
    }

    #[test]
    fn test_missing_column_is_csv_error() {
        let err = read("name\nx\n").unwrap_err();
        assert!(matches!(err, IngestError::Csv(_)));
    }
}
