//! Root directory scanning.
//!
//! Directory sectors are scanned as raw bytes rather than walked as a tree.
//! On disc an entry looks like:
//!
//! ```text
//! -8  u32 LE  start sector (volume relative)
//! -4  u32 LE  file size in bytes
//!  0  u8      attributes
//! +1  u8      name length
//! +2  ..      name
//! ```
//!
//! (offsets relative to the attribute byte). Any position whose length byte
//! matches and whose name bytes spell the target is taken as the entry.

use std::io::{Read, Seek};

use serde::Serialize;

use iso360_core::util::read_u32_le;
use iso360_core::{ByteSource, ReadError, ScanError};

use crate::xgd::DiscGeometry;

/// Name of the boot executable on every Xbox 360 game disc.
pub const DEFAULT_XEX: &str = "default.xex";

/// Location of a file within the volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub sector: u32,
    pub size_bytes: u32,
}

/// Find `target` in a raw directory buffer.
///
/// Scans every offset `i` in `0..len - 12`, treating `i + 1` as a name length
/// and `i + 2..` as the name, compared case-insensitively. The first match
/// wins. The sector and size fields are read from `i - 8` and `i - 4`; a hit
/// too close to the start of the buffer to hold them is skipped.
pub fn scan_entries(dir: &[u8], target: &str) -> Option<DirectoryEntry> {
    let name = target.as_bytes();
    let name_len = name.len();
    let Ok(len_byte) = u8::try_from(name_len) else {
        return None;
    };

    let limit = dir.len().saturating_sub(12);
    for i in 0..limit {
        if dir[i + 1] != len_byte {
            continue;
        }
        let Some(candidate) = dir.get(i + 2..i + 2 + name_len) else {
            continue;
        };
        if !candidate.eq_ignore_ascii_case(name) {
            continue;
        }
        let Some(fields) = i.checked_sub(8) else {
            log::debug!("'{target}' match at 0x{i:X} has no room for its fields, skipping");
            continue;
        };

        // Both reads are in bounds: fields + 8 == i < dir.len()
        let sector = read_u32_le(dir, fields).ok()?;
        let size_bytes = read_u32_le(dir, fields + 4).ok()?;
        log::debug!("'{target}' at directory offset 0x{i:X}: sector {sector}, {size_bytes} bytes");
        return Some(DirectoryEntry { sector, size_bytes });
    }
    None
}

/// Read the root directory and locate `target` in it.
pub fn find_entry<R: Read + Seek>(
    source: &mut ByteSource<R>,
    geometry: &DiscGeometry,
    target: &str,
) -> Result<DirectoryEntry, ScanError> {
    let dir = source.read_vec(geometry.root_dir_offset(), geometry.root_dir_size as usize)?;
    scan_entries(&dir, target).ok_or_else(|| ScanError::EntryNotFound(target.to_string()))
}

/// Read a located file's bytes out of the volume.
pub fn read_entry<R: Read + Seek>(
    source: &mut ByteSource<R>,
    geometry: &DiscGeometry,
    entry: &DirectoryEntry,
) -> Result<Vec<u8>, ReadError> {
    source.read_vec(geometry.sector_offset(entry.sector), entry.size_bytes as usize)
}

#[cfg(test)]
#[path = "tests/directory_tests.rs"]
mod tests;
