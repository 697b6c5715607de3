mod app;
mod cli;
mod error;
mod paths;
mod sample;

use std::fs::File;
use std::str::FromStr;

use clap::Parser;
use frozen_table::{load_rows, FrozenTable, Platform, TableConfig};
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::cli::Cli;
use crate::error::DemoError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli.log_level) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), DemoError> {
    let mut config = match &cli.config {
        Some(path) => TableConfig::load(path)?,
        None => TableConfig::default(),
    };
    if let Some(platform) = cli.platform.as_deref() {
        config.platform = match platform {
            "web" => Platform::Web,
            _ => Platform::Native,
        };
    }

    let rows = match &cli.rows {
        Some(path) => load_rows(path)?,
        None => sample::rows(),
    };
    info!("loaded {} rows, platform {:?}", rows.len(), config.platform);

    app::run(FrozenTable::mount(rows, config))
}

fn init_logging(level: &str) -> Result<(), DemoError> {
    let level = LevelFilter::from_str(level).unwrap_or(LevelFilter::Info);
    let log_file = File::create(paths::log_file())?;
    WriteLogger::init(level, Config::default(), log_file)?;
    Ok(())
}
