//! iso360 CLI
//!
//! Command-line interface for inspecting Xbox 360 disc images.

mod cli_types;
mod commands;
mod error;
mod logging;

use std::process::ExitCode;

use clap::Parser;

use iso360_lookup::LookupSettings;

use cli_types::{CacheAction, Cli, Commands};
pub(crate) use error::CliError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.quiet, cli.verbose, cli.json_output());

    let settings = lookup_settings(&cli);
    let offline = cli.offline;

    let result = match cli.command {
        Commands::Analyze {
            paths,
            json,
            no_lookup,
        } => commands::analyze::run_analyze(&paths, json, (!no_lookup).then_some(settings)),
        Commands::Extract { iso, output } => commands::extract::run_extract(&iso, output),
        Commands::Lookup { media_id } => commands::lookup::run_lookup(&media_id, settings),
        Commands::Cache { action } => match action {
            CacheAction::Fetch => commands::cache::run_cache_fetch(&settings, offline),
            CacheAction::Info => commands::cache::run_cache_info(&settings),
            CacheAction::Clear => commands::cache::run_cache_clear(&settings),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::PartialFailure(failed, total)) => {
            log::warn!("{}", CliError::PartialFailure(failed, total));
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Settings file plus command-line overrides.
fn lookup_settings(cli: &Cli) -> LookupSettings {
    let mut settings = LookupSettings::load().unwrap_or_else(|e| {
        log::warn!(
            "Ignoring {}: {e}",
            iso360_lookup::settings::settings_path().display()
        );
        LookupSettings::default()
    });
    if let Some(ref path) = cli.lookup_csv {
        settings = settings.with_local(path.clone());
    }
    if cli.offline {
        settings = settings.offline();
    }
    settings
}

/// Print a blank line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}

#[cfg(test)]
#[path = "tests/cli_tests.rs"]
mod tests;
