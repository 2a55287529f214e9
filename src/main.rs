mod cli;
mod commands;
mod config;
mod division;
mod error;
mod game;
mod ingest;
mod logging;
mod output;
mod report;
mod season;
mod upload;
mod week;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::Config;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    let load_config = || Config::load_or_default(config_path).context("failed to load configuration");

    match cli.command {
        Command::Generate(args) => commands::generate(args, &load_config()?),
        Command::Check(args) => commands::check(args, &load_config()?),
        Command::Upload(args) => commands::upload(args, &load_config()?),
        Command::InitConfig(args) => commands::init_config(args),
    }
}
