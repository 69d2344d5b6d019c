//! Xbox 360 disc image analyzer.
//!
//! Supports:
//! - ISO images (XGD2 / XGD3 game partitions)
//! - Bare XEX executables
//!
//! Pipeline: detect the layout, find `default.xex` in the root directory,
//! pull it out of the volume, decode its execution info, and optionally
//! resolve the media id to a title.

use std::fs::File;
use std::io::{BufReader, Seek, SeekFrom};
use std::path::Path;

use serde::Serialize;

use iso360_core::{AnalysisError, ByteSource, NameLookup, ReadSeek};

use crate::directory::{self, DEFAULT_XEX, DirectoryEntry};
use crate::xex::{self, ExecutableMetadata};
use crate::xgd::{self, DiscGeometry};

/// Everything learned from one disc image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscReport {
    pub geometry: DiscGeometry,
    pub executable_entry: DirectoryEntry,
    pub executable: ExecutableMetadata,
    /// Title resolved from the media id, if a lookup was supplied and matched.
    pub game_name: Option<String>,
}

/// Analyzer for Xbox 360 disc images.
#[derive(Debug, Default)]
pub struct Xbox360Analyzer;

impl Xbox360Analyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn platform_name(&self) -> &'static str {
        "Microsoft Xbox 360"
    }

    pub fn file_extensions(&self) -> &'static [&'static str] {
        &["iso", "xex"]
    }

    /// Quick check: a supported disc layout, or a bare XEX2 file.
    pub fn can_handle(&self, reader: &mut dyn ReadSeek) -> bool {
        let Ok(mut source) = ByteSource::new(reader) else {
            return false;
        };
        let handled = source
            .read_array::<4>(0)
            .is_ok_and(|magic| xex::is_xex2(&magic))
            || matches!(
                xgd::probe_layout(&mut source),
                Ok(Some(xgd::DiscLayout::Gdf | xgd::DiscLayout::Xgd3))
            );
        if let Err(e) = source.into_inner().seek(SeekFrom::Start(0)) {
            log::debug!("could not rewind after probing: {e}");
            return false;
        }
        handled
    }

    /// Analyze a disc image from a reader.
    pub fn analyze(
        &self,
        reader: &mut dyn ReadSeek,
        lookup: Option<&mut dyn NameLookup>,
    ) -> Result<DiscReport, AnalysisError> {
        let mut source = ByteSource::new(reader)?;
        let geometry = xgd::detect(&mut source)?;
        let executable_entry = directory::find_entry(&mut source, &geometry, DEFAULT_XEX)?;
        let xex_bytes = directory::read_entry(&mut source, &geometry, &executable_entry)?;
        let executable = xex::parse(&xex_bytes)?;

        let game_name = lookup.and_then(|l| l.lookup(&executable.media_id_hex()));
        if game_name.is_none() {
            log::debug!("no title for media id {}", executable.media_id_hex());
        }

        Ok(DiscReport {
            geometry,
            executable_entry,
            executable,
            game_name,
        })
    }

    /// Open and analyze a disc image on disk. The file is closed on return.
    pub fn analyze_path(
        &self,
        path: &Path,
        lookup: Option<&mut dyn NameLookup>,
    ) -> Result<DiscReport, AnalysisError> {
        let mut reader = BufReader::new(File::open(path)?);
        self.analyze(&mut reader, lookup)
    }

    /// Return the raw bytes of the disc's `default.xex`.
    pub fn extract_executable(&self, reader: &mut dyn ReadSeek) -> Result<Vec<u8>, AnalysisError> {
        let mut source = ByteSource::new(reader)?;
        let geometry = xgd::detect(&mut source)?;
        let entry = directory::find_entry(&mut source, &geometry, DEFAULT_XEX)?;
        Ok(directory::read_entry(&mut source, &geometry, &entry)?)
    }

    /// Decode a bare XEX2 file's execution info.
    pub fn analyze_executable(&self, bytes: &[u8]) -> Result<ExecutableMetadata, AnalysisError> {
        Ok(xex::parse(bytes)?)
    }
}

#[cfg(test)]
#[path = "tests/xbox360_tests.rs"]
mod tests;
