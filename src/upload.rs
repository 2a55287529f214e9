// Walks a persisted season into a league site's schedule editor.
//
// For each week in order: open that scoring period, pick the home and away
// team for every game slot, then submit. Nothing is submitted on a dry run.
// The site itself sits behind `ScheduleSite`; the binary only ships the
// in-process dry-run site, which checks every selection against the
// site's team list the way the real dropdowns would.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::game::{Matchup, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("matchups cover {matchups} weeks but the site has {site} scoring periods")]
    WeekCountMismatch { matchups: usize, site: usize },

    #[error("week {week} is out of range for a site with {site} scoring periods")]
    NoSuchWeek { week: usize, site: usize },

    #[error("game {game} {side} dropdown has no option '{team}'")]
    UnknownTeam { game: usize, side: &'static str, team: String },

    #[error("selection made before a week was opened")]
    NoWeekOpen,
}

/// A league site's schedule editor
pub trait ScheduleSite {
    /// Number of scoring periods the site schedules
    fn week_count(&self) -> usize;

    /// Open the editor for a week, numbered from 1
    fn open_week(&mut self, week_number: usize) -> Result<(), UploadError>;

    /// Select the team for one side of a game slot, numbered from 1
    fn choose_team(&mut self, game_number: usize, side: Side, team: &Team) -> Result<(), UploadError>;

    /// Commit the open week
    fn submit(&mut self) -> Result<(), UploadError>;
}

/// Upload settings passed in by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOptions {
    pub dry_run: bool,
    pub show_progress: bool,
}

impl Default for UploadOptions {
    fn default() -> Self {
        UploadOptions {
            dry_run: true,
            show_progress: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub weeks: usize,
    pub games: usize,
    pub submitted: usize,
}

/// Enter every week's matchups, in week order and game order.
/// A week-count mismatch fails before the site is touched.
pub fn set_matchups<S: ScheduleSite>(
    site: &mut S,
    all_matchups: &[Vec<Matchup>],
    options: &UploadOptions,
) -> Result<UploadSummary, UploadError> {
    if all_matchups.len() != site.week_count() {
        return Err(UploadError::WeekCountMismatch {
            matchups: all_matchups.len(),
            site: site.week_count(),
        });
    }

    let bar = if options.show_progress {
        let bar = ProgressBar::new(all_matchups.len() as u64);
        bar.set_style(ProgressStyle::default_bar().template("{bar:40} week {pos}/{len} {msg}"));
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut summary = UploadSummary::default();
    for (week_idx, week_matchups) in all_matchups.iter().enumerate() {
        let week_number = week_idx + 1;
        site.open_week(week_number)?;

        for (game_idx, matchup) in week_matchups.iter().enumerate() {
            let game_number = game_idx + 1;
            site.choose_team(game_number, Side::Home, &matchup.home)?;
            site.choose_team(game_number, Side::Away, &matchup.away)?;
            summary.games += 1;
        }

        if options.dry_run {
            debug!(week_number, "dry run, not submitting");
        } else {
            site.submit()?;
            summary.submitted += 1;
        }
        summary.weeks += 1;
        bar.inc(1);
    }
    bar.finish_with_message(if options.dry_run { "dry run complete" } else { "submitted" });

    info!(
        weeks = summary.weeks,
        games = summary.games,
        submitted = summary.submitted,
        dry_run = options.dry_run,
        "matchups entered"
    );
    Ok(summary)
}

/// One recorded interaction with a dry-run site
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteAction {
    OpenWeek(usize),
    Choose { game: usize, side: Side, team: Team },
    Submit(usize),
}

/// In-process site that validates and records selections instead of
/// driving a browser
#[derive(Debug, Clone)]
pub struct DryRunSite {
    week_count: usize,
    /// Dropdown options; empty accepts any team
    teams: Vec<Team>,
    open_week: Option<usize>,
    pub actions: Vec<SiteAction>,
}

impl DryRunSite {
    pub fn new(week_count: usize, teams: Vec<Team>) -> Self {
        DryRunSite {
            week_count,
            teams,
            open_week: None,
            actions: Vec::new(),
        }
    }
}

impl ScheduleSite for DryRunSite {
    fn week_count(&self) -> usize {
        self.week_count
    }

    fn open_week(&mut self, week_number: usize) -> Result<(), UploadError> {
        if week_number == 0 || week_number > self.week_count {
            return Err(UploadError::NoSuchWeek {
                week: week_number,
                site: self.week_count,
            });
        }
        self.open_week = Some(week_number);
        self.actions.push(SiteAction::OpenWeek(week_number));
        Ok(())
    }

    fn choose_team(&mut self, game_number: usize, side: Side, team: &Team) -> Result<(), UploadError> {
        if self.open_week.is_none() {
            return Err(UploadError::NoWeekOpen);
        }
        if !self.teams.is_empty() && !self.teams.contains(team) {
            return Err(UploadError::UnknownTeam {
                game: game_number,
                side: side.as_str(),
                team: team.to_string(),
            });
        }
        debug!(game_number, side = side.as_str(), team = %team, "selected team");
        self.actions.push(SiteAction::Choose {
            game: game_number,
            side,
            team: team.clone(),
        });
        Ok(())
    }

    fn submit(&mut self) -> Result<(), UploadError> {
        let week = self.open_week.take().ok_or(UploadError::NoWeekOpen)?;
        self.actions.push(SiteAction::Submit(week));
        Ok(())
    }
}
