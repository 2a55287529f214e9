// Configuration module for the league schedule generator
// Supports YAML configuration files for the league's divisions, output paths, and upload settings

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::division::{Division, League};
use crate::error::ScheduleError;
use crate::game::Team;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub league: LeagueSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub upload: UploadSettings,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load configuration from file if one is given, otherwise look in the
    /// default locations, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                for default_path in ["schedule.yaml", "schedule.yml", ".league-schedule.yaml"] {
                    let candidate = Path::new(default_path);
                    if candidate.exists() {
                        match Self::from_file(candidate) {
                            Ok(config) => {
                                info!(path = default_path, "loaded configuration");
                                return Ok(config);
                            }
                            Err(e) => warn!(path = default_path, error = %e, "ignoring unreadable config"),
                        }
                    }
                }
                Ok(Self::default())
            }
        }
    }

    /// Save configuration to a YAML file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }
}

/// One division: a name and its teams in seating order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisionSettings {
    pub name: String,
    pub teams: Vec<String>,
}

impl DivisionSettings {
    fn from_division(division: &Division) -> Self {
        DivisionSettings {
            name: division.name.clone(),
            teams: division.teams().iter().map(|t| t.name().to_string()).collect(),
        }
    }

    fn to_division(&self) -> Result<Division, ScheduleError> {
        Division::new(&self.name, self.teams.iter().map(|t| Team::new(t)).collect())
    }
}

/// The two divisions of the league
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSettings {
    #[serde(default = "default_first_division")]
    pub first: DivisionSettings,
    #[serde(default = "default_second_division")]
    pub second: DivisionSettings,
}

impl Default for LeagueSettings {
    fn default() -> Self {
        LeagueSettings {
            first: default_first_division(),
            second: default_second_division(),
        }
    }
}

impl LeagueSettings {
    /// Validate the configured divisions and pair them into a league
    pub fn to_league(&self) -> Result<League, ScheduleError> {
        League::new(self.first.to_division()?, self.second.to_division()?)
    }

    /// Settings that reproduce an already validated league
    pub fn from_league(league: &League) -> Self {
        LeagueSettings {
            first: DivisionSettings::from_division(&league.first),
            second: DivisionSettings::from_division(&league.second),
        }
    }
}

fn default_first_division() -> DivisionSettings {
    DivisionSettings {
        name: "Wales".to_string(),
        teams: ["Steamers", "Army", "Breakfast Kings", "Loonies", "Magoons"]
            .iter()
            .map(|t| t.to_string())
            .collect(),
    }
}

fn default_second_division() -> DivisionSettings {
    DivisionSettings {
        name: "Campbell".to_string(),
        teams: ["Pleased", "Zaus", "Poachers", "Pants", "Cold Necks"]
            .iter()
            .map(|t| t.to_string())
            .collect(),
    }
}

/// Where generated schedules are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Matchups file consumed by the upload step
    #[serde(default = "default_matchups_path")]
    pub matchups: PathBuf,

    /// Optional flat csv export of the schedule
    #[serde(default)]
    pub csv: Option<PathBuf>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            matchups: default_matchups_path(),
            csv: None,
        }
    }
}

fn default_matchups_path() -> PathBuf {
    PathBuf::from("matchups.json")
}

/// Upload walk settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadSettings {
    /// Only simulate the upload
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Number of scoring periods the target site has
    #[serde(default = "default_site_weeks")]
    pub site_weeks: usize,
}

impl Default for UploadSettings {
    fn default() -> Self {
        UploadSettings {
            dry_run: default_dry_run(),
            site_weeks: default_site_weeks(),
        }
    }
}

fn default_dry_run() -> bool { true }
fn default_site_weeks() -> usize { crate::season::WEEKS_PER_SEASON }

/// Generate a sample configuration file
pub fn generate_sample_config() -> String {
    r#"# League Schedule Configuration
# All values shown are defaults - uncomment and modify as needed

# The two divisions, teams listed in seating order.
# Seating order matters: neighbours at the table play each other
# in the week the team between them plays across divisions.
league:
  first:
    name: Wales
    teams: ["Steamers", "Army", "Breakfast Kings", "Loonies", "Magoons"]
  second:
    name: Campbell
    teams: ["Pleased", "Zaus", "Poachers", "Pants", "Cold Necks"]

# Output settings
output:
  # Matchups file read by the upload command
  matchups: matchups.json
  # Flat csv export (week,title,game,home,away); omit to skip
  # csv: schedule.csv

# Upload settings
upload:
  # Only walk through the selections without submitting
  dry_run: true
  # Number of scoring periods on the target site
  site_weeks: 17
"#.to_string()
}
