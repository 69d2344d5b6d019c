use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use iso360_core::NameLookup;
use iso360_lookup::{GameNameLookup, LookupSettings};

use crate::CliError;

/// Validate and normalise a media id argument to 8 uppercase hex digits.
pub(crate) fn normalize_media_id(raw: &str) -> Result<String, CliError> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.len() != 8 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CliError::other(format!(
            "'{raw}' is not a media id (expected 8 hex digits)"
        )));
    }
    Ok(digits.to_ascii_uppercase())
}

/// Resolve a media id to a title.
pub(crate) fn run_lookup(media_id: &str, settings: LookupSettings) -> Result<(), CliError> {
    let media_id = normalize_media_id(media_id)?;
    let mut lookup = GameNameLookup::new(settings);

    match lookup.lookup(&media_id) {
        Some(name) => {
            log::info!(
                "{}  {}",
                media_id.if_supports_color(Stdout, |t| t.cyan()),
                name.if_supports_color(Stdout, |t| t.bold()),
            );
            Ok(())
        }
        None => Err(CliError::other(format!(
            "No title found for media id {media_id}"
        ))),
    }
}
