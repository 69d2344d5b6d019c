use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use iso360_core::util::format_bytes;
use iso360_xbox::Xbox360Analyzer;

use crate::CliError;

/// Default output path: the image path with a `.xex` extension.
pub(crate) fn default_output(iso: &Path) -> PathBuf {
    iso.with_extension("xex")
}

/// Copy the disc's `default.xex` to `output`.
pub(crate) fn run_extract(iso: &Path, output: Option<PathBuf>) -> Result<(), CliError> {
    let output = output.unwrap_or_else(|| default_output(iso));
    if output == iso {
        return Err(CliError::other(format!(
            "Refusing to overwrite the input image {}",
            iso.display()
        )));
    }

    let analyzer = Xbox360Analyzer::new();
    let mut reader = BufReader::new(File::open(iso)?);
    let bytes = analyzer.extract_executable(&mut reader)?;

    fs::write(&output, &bytes)?;
    log::info!(
        "{} Wrote {} ({})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        output.display(),
        format_bytes(bytes.len() as u64),
    );
    Ok(())
}
