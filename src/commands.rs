use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::cli::{CheckArgs, GenerateArgs, InitConfigArgs, UploadArgs};
use crate::config::{generate_sample_config, Config, LeagueSettings};
use crate::division::League;
use crate::ingest;
use crate::output;
use crate::report::{self, Report};
use crate::season::Season;
use crate::upload::{self, DryRunSite, UploadOptions};

/// League from the teams csv if given, otherwise from config
fn load_league(teams: Option<&Path>, config: &Config) -> Result<League> {
    match teams {
        Some(path) => ingest::league_from_csv(path)
            .with_context(|| format!("failed to load teams from {}", path.display())),
        None => config.league.to_league().context("invalid league in configuration"),
    }
}

/// Build and fully verify a season; nothing is returned unless it is sound
fn build_season(league: &League) -> Result<Season> {
    let season = Season::generate(league).context("failed to generate schedule")?;
    let violations = report::validate(&season, league);
    if !violations.is_empty() {
        for v in &violations {
            warn!("{v}");
        }
        bail!("generated schedule breaks {} invariant(s)", violations.len());
    }
    info!(
        weeks = season.weeks().len(),
        games = season.games().count(),
        "season generated and verified"
    );
    Ok(season)
}

pub fn generate(args: GenerateArgs, config: &Config) -> Result<()> {
    let league = load_league(args.teams.as_deref(), config)?;
    let season = build_season(&league)?;

    if !args.quiet {
        print!("{}", output::render_full_report(&season, &league));
    }

    let matchups_path = args.out.as_ref().unwrap_or(&config.output.matchups);
    output::write_matchups(&season, matchups_path)
        .with_context(|| format!("failed to write matchups to {}", matchups_path.display()))?;

    if let Some(csv_path) = args.csv.as_ref().or(config.output.csv.as_ref()) {
        output::write_csv(&season, csv_path)
            .with_context(|| format!("failed to write csv to {}", csv_path.display()))?;
    }

    eprintln!("Wrote {}", matchups_path.display());
    Ok(())
}

pub fn check(args: CheckArgs, config: &Config) -> Result<()> {
    let league = load_league(args.teams.as_deref(), config)?;
    let season = Season::generate(&league).context("failed to generate schedule")?;

    println!("Sanity check:");
    print!("{}", Report::from_season(&season, &league.first).sanity_lines(&league));

    let violations = report::validate(&season, &league);
    if violations.is_empty() {
        println!("\nAll invariants hold.");
        return Ok(());
    }

    println!();
    for v in &violations {
        println!("  {v}");
    }
    bail!("{} invariant violation(s)", violations.len())
}

pub fn upload(args: UploadArgs, config: &Config) -> Result<()> {
    let dry_run = config.upload.dry_run && !args.no_dry_run;
    if !dry_run {
        bail!("real submission needs a site connection, which this build does not include; run without --no-dry-run");
    }

    let path = args.matchups.as_ref().unwrap_or(&config.output.matchups);
    let matchups = output::read_matchups(path)
        .with_context(|| format!("failed to read matchups from {}", path.display()))?;

    // The site's dropdowns list the league the matchups were generated for
    let league = load_league(args.teams.as_deref(), config)?;
    let mut site = DryRunSite::new(config.upload.site_weeks, league.all_teams().cloned().collect());

    let options = UploadOptions {
        dry_run,
        show_progress: !args.no_progress,
    };
    let summary = upload::set_matchups(&mut site, &matchups, &options).context("upload failed")?;

    println!(
        "Dry run: {} weeks, {} games selected, {} submitted",
        summary.weeks, summary.games, summary.submitted
    );
    Ok(())
}

pub fn init_config(args: InitConfigArgs) -> Result<()> {
    if args.out.exists() && !args.force {
        bail!("{} already exists; pass --force to overwrite", args.out.display());
    }
    match args.teams.as_deref() {
        Some(teams) => {
            let league = ingest::league_from_csv(teams)
                .with_context(|| format!("failed to load teams from {}", teams.display()))?;
            let config = Config {
                league: LeagueSettings::from_league(&league),
                ..Config::default()
            };
            config
                .save_to_file(&args.out)
                .with_context(|| format!("failed to write {}", args.out.display()))?;
            println!("Wrote config for {} and {} to {}", league.first.name, league.second.name, args.out.display());
        }
        None => {
            fs::write(&args.out, generate_sample_config())
                .with_context(|| format!("failed to write {}", args.out.display()))?;
            println!("Wrote sample config to {}", args.out.display());
        }
    }
    Ok(())
}
