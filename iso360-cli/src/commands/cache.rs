use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use iso360_core::util::format_bytes;
use iso360_lookup::{HttpDownloader, LookupSettings, cache};

use crate::CliError;

/// Download the title table now.
pub(crate) fn run_cache_fetch(settings: &LookupSettings, offline: bool) -> Result<(), CliError> {
    if offline {
        return Err(CliError::other("Cannot fetch the title table with --offline"));
    }

    let meta = cache::fetch(settings, &HttpDownloader)?;
    log::info!(
        "{} Fetched {} titles ({}) into {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        meta.entry_count,
        format_bytes(meta.file_size),
        settings.local.display(),
    );
    Ok(())
}

/// Show the cached table's location, size and age.
pub(crate) fn run_cache_info(settings: &LookupSettings) -> Result<(), CliError> {
    let Some(status) = cache::info(settings)? else {
        log::info!(
            "{}",
            format!("No title table at {}", settings.local.display())
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
        log::info!("Run 'iso360 cache fetch' to download it.");
        return Ok(());
    };

    log::info!(
        "{}",
        "Title table:".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Path: {}", status.path.display());
    log::info!("  Size: {}", format_bytes(status.file_size));
    if let Some(age) = status.age {
        let stale = age >= settings.min_age();
        log::info!(
            "  Age:  {}{}",
            format_age(age.as_secs()),
            if stale { " (due for refresh)" } else { "" },
        );
    }
    match status.meta {
        Some(meta) => {
            log::info!("  Source: {}", meta.source);
            log::info!("  Downloaded: {}", meta.downloaded);
            log::info!("  Titles: {}", meta.entry_count);
        }
        None => log::info!(
            "  {}",
            "No download record (placed by hand?)".if_supports_color(Stdout, |t| t.dimmed()),
        ),
    }
    Ok(())
}

/// Remove the cached table.
pub(crate) fn run_cache_clear(settings: &LookupSettings) -> Result<(), CliError> {
    let freed = cache::clear(settings)?;
    log::info!(
        "{} Cache cleared ({} freed)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        format_bytes(freed),
    );
    Ok(())
}

/// Coarse human-readable age.
pub(crate) fn format_age(secs: u64) -> String {
    match secs {
        0..60 => format!("{secs}s"),
        60..3600 => format!("{}m", secs / 60),
        3600..86400 => format!("{}h", secs / 3600),
        _ => format!("{}d", secs / 86400),
    }
}
