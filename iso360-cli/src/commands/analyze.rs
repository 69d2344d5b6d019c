use std::fs;
use std::path::{Path, PathBuf};

use log::Level;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde::Serialize;

use iso360_core::util::{format_bytes, format_bytes_approx};
use iso360_core::{AnalysisError, NameLookup, SECTOR_SIZE};
use iso360_lookup::{GameNameLookup, LookupSettings};
use iso360_xbox::xex::format_version;
use iso360_xbox::{DiscReport, ExecutableMetadata, Xbox360Analyzer};

use crate::CliError;

/// What was learned from one input file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Outcome {
    Disc(DiscReport),
    Executable {
        executable: ExecutableMetadata,
        game_name: Option<String>,
    },
    Error(String),
}

#[derive(Debug, Serialize)]
struct FileResult<'a> {
    path: &'a Path,
    #[serde(flatten)]
    outcome: Outcome,
}

/// Run the analyze command.
///
/// Every path is attempted; failures are reported and counted.
pub(crate) fn run_analyze(
    paths: &[PathBuf],
    json: bool,
    settings: Option<LookupSettings>,
) -> Result<(), CliError> {
    let analyzer = Xbox360Analyzer::new();
    let mut lookup = settings.map(GameNameLookup::new);

    let mut results = Vec::with_capacity(paths.len());
    let mut failed = 0usize;

    for path in paths {
        let outcome = match analyze_file(&analyzer, path, lookup.as_mut()) {
            Ok(outcome) => outcome,
            Err(e) => {
                failed += 1;
                Outcome::Error(e.to_string())
            }
        };

        if json {
            results.push(FileResult { path, outcome });
        } else {
            print_outcome(path, &outcome);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    if failed > 0 {
        return Err(CliError::PartialFailure(failed, paths.len()));
    }
    Ok(())
}

/// Whether `path` names a bare executable rather than a disc image.
pub(crate) fn is_executable_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xex"))
}

/// Analyze one file, resolving its title through `lookup` when given.
pub(crate) fn analyze_file(
    analyzer: &Xbox360Analyzer,
    path: &Path,
    lookup: Option<&mut GameNameLookup>,
) -> Result<Outcome, AnalysisError> {
    log::debug!("Analyzing {}", path.display());

    if is_executable_path(path) {
        let bytes = fs::read(path)?;
        let executable = analyzer.analyze_executable(&bytes)?;
        let game_name = lookup.and_then(|l| l.lookup(&executable.media_id_hex()));
        return Ok(Outcome::Executable {
            executable,
            game_name,
        });
    }

    let lookup = lookup.map(|l| l as &mut dyn NameLookup);
    Ok(Outcome::Disc(analyzer.analyze_path(path, lookup)?))
}

fn print_outcome(path: &Path, outcome: &Outcome) {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("?");

    match outcome {
        Outcome::Disc(report) => {
            for (level, msg) in format_disc(file_name, report) {
                log::log!(level, "{}", msg);
            }
        }
        Outcome::Executable {
            executable,
            game_name,
        } => {
            log::info!(
                "{}:",
                file_name.if_supports_color(Stdout, |t| t.bold())
            );
            for (level, msg) in format_executable(executable, game_name.as_deref()) {
                log::log!(level, "{}", msg);
            }
        }
        Outcome::Error(e) => {
            log::warn!(
                "{}: {} Analysis failed ({})",
                file_name,
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                e,
            );
        }
    }
    crate::log_blank();
}

fn field(label: &str, value: impl std::fmt::Display) -> (Level, String) {
    (
        Level::Info,
        format!(
            "  {}{}",
            format!("{:<14}", format!("{label}:")).if_supports_color(Stdout, |t| t.cyan()),
            value,
        ),
    )
}

/// Format a disc report as level-tagged lines, header first.
pub(crate) fn format_disc(file_name: &str, report: &DiscReport) -> Vec<(Level, String)> {
    let geometry = &report.geometry;
    let mut lines = vec![(
        Level::Info,
        format!("{}:", file_name.if_supports_color(Stdout, |t| t.bold())),
    )];

    lines.push(field(
        "Layout",
        format!(
            "{} (root offset 0x{:08X})",
            geometry.layout.name(),
            geometry.root_offset
        ),
    ));
    lines.push(field("Identifier", geometry.identifier_str()));
    lines.push(field(
        "Image size",
        format!(
            "{} ({})",
            format_bytes_approx(geometry.image_size),
            geometry.image_size
        ),
    ));
    lines.push(field(
        "Volume",
        format!(
            "{} in {} sectors of {} bytes",
            format_bytes(geometry.volume_size),
            geometry.whole_volume_sectors(),
            SECTOR_SIZE
        ),
    ));
    lines.push(field(
        "Root dir",
        format!(
            "sector {}, {} bytes",
            geometry.root_dir_sector, geometry.root_dir_size
        ),
    ));
    lines.push(field(
        "default.xex",
        format!(
            "sector {}, {}",
            report.executable_entry.sector,
            format_bytes(report.executable_entry.size_bytes as u64)
        ),
    ));

    lines.extend(format_executable(
        &report.executable,
        report.game_name.as_deref(),
    ));
    lines
}

/// Format decoded execution info as level-tagged lines.
pub(crate) fn format_executable(
    executable: &ExecutableMetadata,
    game_name: Option<&str>,
) -> Vec<(Level, String)> {
    let name = match game_name {
        Some(name) => name.if_supports_color(Stdout, |t| t.green()).to_string(),
        None => "(unknown)"
            .if_supports_color(Stdout, |t| t.dimmed())
            .to_string(),
    };

    vec![
        field("Media ID", executable.media_id_hex()),
        field("Title ID", executable.title_id_hex()),
        field("Version", format_version(executable.version)),
        field("Base version", format_version(executable.base_version)),
        field("Platform", executable.platform),
        field("Type", executable.executable_type),
        field("Disc", executable.disc_label()),
        field("Name", name),
    ]
}
