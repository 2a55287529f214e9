use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Two-division league schedule generator.
#[derive(Parser)]
#[command(
    name = "league-schedule",
    version,
    about = "Generate a 17-week two-division league schedule"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to YAML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Build the season, print the report, and write the matchups file.
    Generate(GenerateArgs),
    /// Build the season and verify every schedule invariant.
    Check(CheckArgs),
    /// Walk a matchups file through the schedule editor.
    Upload(UploadArgs),
    /// Write a sample configuration file.
    InitConfig(InitConfigArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Read divisions from a `division,team` csv instead of the config.
    #[arg(short, long)]
    pub teams: Option<PathBuf>,

    /// Override the matchups output path from config.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Also write a flat csv of the schedule.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Skip printing the report.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `check` subcommand.
#[derive(clap::Args)]
pub struct CheckArgs {
    /// Read divisions from a `division,team` csv instead of the config.
    #[arg(short, long)]
    pub teams: Option<PathBuf>,
}

/// Arguments for the `upload` subcommand.
#[derive(clap::Args)]
pub struct UploadArgs {
    /// Read divisions from a `division,team` csv instead of the config.
    #[arg(short, long)]
    pub teams: Option<PathBuf>,

    /// Override the matchups input path from config.
    #[arg(short, long)]
    pub matchups: Option<PathBuf>,

    /// Submit each week instead of only simulating.
    #[arg(long)]
    pub no_dry_run: bool,

    /// Hide the progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

/// Arguments for the `init-config` subcommand.
#[derive(clap::Args)]
pub struct InitConfigArgs {
    /// Where to write the sample config.
    #[arg(short, long, default_value = "schedule.yaml")]
    pub out: PathBuf,

    /// Fill the league section from a `division,team` csv.
    #[arg(short, long)]
    pub teams: Option<PathBuf>,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}
