// Everything that leaves the process: the text report, the matchups file
// read back by the upload step, and a flat csv view of the schedule.

use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::division::League;
use crate::game::Matchup;
use crate::report::Report;
use crate::season::Season;

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid matchups json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> OutputError + '_ {
    move |source| OutputError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Sanity check, then week by week, then each team's own schedule
pub fn render_full_report(season: &Season, league: &League) -> String {
    let mut out = String::new();

    // Sanity check at the top so a broken schedule is obvious
    let report = Report::from_season(season, &league.first);
    out.push_str("Sanity check:\n");
    out.push_str(&report.sanity_lines(league));

    out.push_str("\n\n");
    for week in season.weeks() {
        out.push_str(&format!("{}\n", week.title));
        for game in &week.games {
            out.push_str(&format!("  {}\n", game));
        }
    }

    out.push_str("\n\n");
    for team in league.all_teams() {
        out.push_str(&format!("##### {} #####\n", team));
        for week in season.weeks() {
            for game in week.games.iter().filter(|g| g.involves(team)) {
                out.push_str(&format!("  {}: {}\n", week.title, game));
            }
        }
    }

    out
}

/// Write the matchups file: one array of {home, away} per week, in order
pub fn write_matchups(season: &Season, path: &Path) -> Result<(), OutputError> {
    let file = File::create(path).map_err(io_error(path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &season.matchups())?;
    writer.flush().map_err(io_error(path))?;
    info!(path = %path.display(), weeks = season.weeks().len(), "wrote matchups");
    Ok(())
}

/// Read a matchups file back, keeping week and game order
pub fn read_matchups(path: &Path) -> Result<Vec<Vec<Matchup>>, OutputError> {
    let file = File::open(path).map_err(io_error(path))?;
    let matchups: Vec<Vec<Matchup>> = serde_json::from_reader(BufReader::new(file))?;
    info!(path = %path.display(), weeks = matchups.len(), "read matchups");
    Ok(matchups)
}

#[derive(Debug, Serialize)]
struct ScheduleRow<'a> {
    week: usize,
    title: &'a str,
    game: usize,
    home: &'a str,
    away: &'a str,
}

/// Flat csv export, one row per game
pub fn write_csv(season: &Season, path: &Path) -> Result<(), OutputError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for (week_idx, week) in season.weeks().iter().enumerate() {
        for (game_idx, game) in week.games.iter().enumerate() {
            wtr.serialize(ScheduleRow {
                week: week_idx + 1,
                title: &week.title,
                game: game_idx + 1,
                home: game.home.name(),
                away: game.away.name(),
            })?;
        }
    }
    wtr.flush().map_err(io_error(path))?;
    info!(path = %path.display(), "wrote schedule csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::game::Team;

    fn setup() -> (League, Season) {
        let league = Config::default().league.to_league().unwrap();
        let season = Season::generate(&league).unwrap();
        (league, season)
    }

    #[test]
    fn test_report_sections() {
        let (league, season) = setup();
        let text = render_full_report(&season, &league);
        assert!(text.starts_with("Sanity check:\nSteamers: home: 8, in_div: 12, opps: 9; total 17\n"));
        assert!(text.contains("Weird Week #1\n  Steamers at Pleased\n"));
        assert!(text.contains("##### Cold Necks #####\n  Weird Week #1: Magoons at Cold Necks\n"));
        // each team line section lists 17 games
        let steamers = text.split("##### Steamers #####\n").nth(1).unwrap();
        let listed = steamers.lines().take_while(|l| l.starts_with("  ")).count();
        assert_eq!(listed, 17);
    }

    #[test]
    fn test_matchups_file_round_trip_keeps_order() {
        let (_, season) = setup();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matchups.json");

        write_matchups(&season, &path).unwrap();
        let matchups = read_matchups(&path).unwrap();
        assert_eq!(matchups, season.matchups());
        assert_eq!(matchups[0][0].home, Team::new("Pleased"));
    }

    #[test]
    fn test_matchups_file_shape() {
        let (_, season) = setup();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matchups.json");
        write_matchups(&season, &path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let weeks = value.as_array().unwrap();
        assert_eq!(weeks.len(), 17);
        assert_eq!(weeks[1][0]["home"], "Steamers");
        assert_eq!(weeks[1][0]["away"], "Zaus");
    }

    #[test]
    fn test_read_missing_file_names_the_path() {
        let err = read_matchups(Path::new("/nonexistent/matchups.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/matchups.json"));
    }

    #[test]
    fn test_csv_rows() {
        let (_, season) = setup();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.csv");
        write_csv(&season, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("week,title,game,home,away"));
        assert_eq!(lines.next(), Some("1,Weird Week #1,1,Pleased,Steamers"));
        assert_eq!(text.lines().count(), 86);
    }
}
