//! XEX2 executable header parsing.
//!
//! All multi-byte fields are big-endian. Layout of the fixed header:
//!
//! ```text
//! 0x00  "XEX2"
//! 0x04  module flags
//! 0x08  code (PE image) offset
//! 0x0C  reserved
//! 0x10  security info (certificate) offset
//! 0x14  optional header count
//! 0x18  optional headers: { u32 id, u32 value } * count
//! ```
//!
//! Only the execution info optional header is interpreted; its value is the
//! file offset of the block decoded into [`ExecutableMetadata`].

use serde::{Serialize, Serializer};

use iso360_core::HeaderError;
use iso360_core::util::{array_at, hex_upper, read_u8, read_u32_be};

/// Executable magic.
pub const XEX2_MAGIC: &[u8; 4] = b"XEX2";

/// Optional header id of the execution info block.
pub const EXECUTION_INFO_ID: u32 = 0x0004_0006;

const CODE_OFFSET_FIELD: usize = 0x08;
const CERT_OFFSET_FIELD: usize = 0x10;
const HEADER_COUNT_FIELD: usize = 0x14;
const HEADER_TABLE: usize = 0x18;
const HEADER_ENTRY_SIZE: usize = 8;

/// Identifying fields from the execution info block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutableMetadata {
    #[serde(serialize_with = "as_hex")]
    pub media_id: [u8; 4],
    pub version: u32,
    pub base_version: u32,
    #[serde(serialize_with = "as_hex")]
    pub title_id: [u8; 4],
    pub platform: u8,
    pub executable_type: u8,
    pub disc_number: u8,
    pub disc_count: u8,
}

fn as_hex<S: Serializer>(bytes: &[u8; 4], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&hex_upper(bytes))
}

impl ExecutableMetadata {
    /// Media id as uppercase hex, the key used for title lookups.
    pub fn media_id_hex(&self) -> String {
        hex_upper(&self.media_id)
    }

    pub fn title_id_hex(&self) -> String {
        hex_upper(&self.title_id)
    }

    /// e.g. "Disc 1 of 2"
    pub fn disc_label(&self) -> String {
        format!("Disc {} of {}", self.disc_number, self.disc_count)
    }
}

/// Render a packed XEX version as `major.minor.build.qfe`.
///
/// Bits: major 31..28, minor 27..24, build 23..8, qfe 7..0.
pub fn format_version(v: u32) -> String {
    format!(
        "{}.{}.{}.{}",
        v >> 28,
        (v >> 24) & 0xF,
        (v >> 8) & 0xFFFF,
        v & 0xFF
    )
}

/// Cheap magic check for detection.
pub fn is_xex2(buf: &[u8]) -> bool {
    buf.starts_with(XEX2_MAGIC)
}

/// Walk the optional header table and return the execution info address.
///
/// Every entry is visited; if the id repeats, the last one wins.
fn find_execution_info(buf: &[u8], count: u32) -> Result<u32, HeaderError> {
    let mut address = None;
    for i in 0..count as usize {
        let entry = HEADER_TABLE + i * HEADER_ENTRY_SIZE;
        let id = read_u32_be(buf, entry)?;
        if id == EXECUTION_INFO_ID {
            address = Some(read_u32_be(buf, entry + 4)?);
        }
    }
    address.ok_or(HeaderError::ExecutionInfoNotFound)
}

/// Parse an XEX2 image and decode its execution info.
pub fn parse(buf: &[u8]) -> Result<ExecutableMetadata, HeaderError> {
    let magic = array_at::<4>(buf, 0)?;
    if &magic != XEX2_MAGIC {
        return Err(HeaderError::BadMagic(magic));
    }

    let size = buf.len() as u64;
    // A zero offset would place code over the header itself.
    let code_offset = read_u32_be(buf, CODE_OFFSET_FIELD)?;
    if code_offset == 0 || code_offset as u64 > size {
        return Err(HeaderError::CodeOffsetOutOfRange { code_offset, size });
    }

    let cert_offset = read_u32_be(buf, CERT_OFFSET_FIELD)?;
    if cert_offset > code_offset {
        return Err(HeaderError::CertOffsetBeyondCode {
            cert_offset,
            code_offset,
        });
    }

    let entries = read_u32_be(buf, HEADER_COUNT_FIELD)?;
    let table_end = entries as u64 * HEADER_ENTRY_SIZE as u64 + HEADER_TABLE as u64;
    if table_end > code_offset as u64 {
        return Err(HeaderError::InfoTableOverflow {
            entries,
            code_offset,
        });
    }

    let info = find_execution_info(buf, entries)? as usize;
    log::debug!("execution info at 0x{info:X} ({entries} optional headers)");

    Ok(ExecutableMetadata {
        media_id: array_at::<4>(buf, info)?,
        version: read_u32_be(buf, info + 4)?,
        base_version: read_u32_be(buf, info + 8)?,
        title_id: array_at::<4>(buf, info + 12)?,
        platform: read_u8(buf, info + 16)?,
        executable_type: read_u8(buf, info + 17)?,
        disc_number: read_u8(buf, info + 18)?,
        disc_count: read_u8(buf, info + 19)?,
    })
}

#[cfg(test)]
#[path = "tests/xex_tests.rs"]
mod tests;
