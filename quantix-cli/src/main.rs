mod cli;
mod commands;
mod error;
mod paths;
mod render;
mod settings;

use std::fs::File;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::cli::Cli;
use crate::commands::Context;
use crate::paths::Paths;
use crate::settings::MemoryBackend;
use crate::settings::Preferences;
use crate::settings::SettingsProvider;
use crate::settings::SqliteBackend;

/// Installs the file logger. Logging is best effort: a failure is reported and
/// the command still runs.
fn init_logging(paths: Option<&Paths>, verbose: bool) {
    let Some(paths) = paths else {
        eprintln!("Warning: no home directory, logging disabled");
        return;
    };

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let result = paths
        .rotate_logs()
        .and_then(File::create)
        .map_err(|e| e.to_string())
        .and_then(|file| WriteLogger::init(level, Config::default(), file).map_err(|e| e.to_string()));
    if let Err(e) = result {
        eprintln!("Warning: failed to initialize logger: {}", e);
    }
}

/// Opens the preferences database, falling back to in-memory settings.
async fn open_settings(paths: Option<&Paths>) -> SettingsProvider {
    if let Some(paths) = paths {
        match paths.settings_db() {
            Ok(db) => match SqliteBackend::new(&db).await {
                Ok(backend) => return SettingsProvider::new(backend),
                Err(e) => log::warn!("Failed to open {}: {}", db.display(), e),
            },
            Err(e) => log::warn!("No data directory: {}", e),
        }
    }
    log::warn!("Using in-memory settings");
    SettingsProvider::new(MemoryBackend::new())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let paths = Paths::detect();
    init_logging(paths.as_ref(), cli.verbose);
    log::debug!("{:?}", cli.command);

    let settings = open_settings(paths.as_ref()).await;
    log::debug!("Preferences stored in {}", settings.location());
    let prefs = match Preferences::load(&settings).await {
        Ok(prefs) => prefs,
        Err(e) => {
            log::warn!("Failed to load preferences: {}", e);
            Preferences::default()
        }
    };
    let ctx = Context { settings, prefs };

    let mut out = io::stdout().lock();
    match commands::run(cli.command, &ctx, &mut out).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
