//! Xbox Game Disc layout detection.
//!
//! Every layout carries the same volume descriptor 32 sectors into its game
//! partition: a 20-byte `MICROSOFT*XBOX*MEDIA` signature followed by the
//! little-endian root directory sector and size. Layouts differ only in where
//! that partition starts on the disc.

use std::io::{Read, Seek};

use serde::Serialize;

use iso360_core::{ByteSource, LayoutError, ReadError, SECTOR_SIZE};

/// Volume descriptor signature.
pub const MEDIA_SIGNATURE: &[u8; 20] = b"MICROSOFT*XBOX*MEDIA";

/// Sector holding the volume descriptor, relative to the root offset.
const DESCRIPTOR_SECTOR: u64 = 0x20;

/// Supported and recognized disc layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiscLayout {
    /// Original Xbox filesystem at the start of the image. Rejected.
    Xsf,
    /// XGD2 game partition.
    Gdf,
    /// XGD3 game partition.
    Xgd3,
}

/// Probe order: the legacy layout is checked first so it can be rejected.
const PROBE_ORDER: [DiscLayout; 3] = [DiscLayout::Xsf, DiscLayout::Gdf, DiscLayout::Xgd3];

impl DiscLayout {
    /// Byte offset of the game partition within the image.
    pub fn root_offset(&self) -> u32 {
        match self {
            Self::Xsf => 0,
            Self::Gdf => 0x0FD9_0000,
            Self::Xgd3 => 0x0208_0000,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Xsf => "XSF",
            Self::Gdf => "GDF",
            Self::Xgd3 => "XGD3",
        }
    }

    /// Absolute offset of this layout's volume descriptor.
    pub fn descriptor_offset(&self) -> u64 {
        DESCRIPTOR_SECTOR * SECTOR_SIZE as u64 + self.root_offset() as u64
    }
}

/// Volume geometry of a detected disc.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscGeometry {
    pub layout: DiscLayout,
    pub sector_size: u32,
    pub root_offset: u32,
    /// Raw volume identifier (the signature itself on well-formed discs).
    pub identifier: [u8; 20],
    pub root_dir_sector: u32,
    pub root_dir_size: u32,
    pub image_size: u64,
    pub volume_size: u64,
    /// Volume size in sectors. Fractional when the image isn't sector
    /// aligned; informational only.
    pub volume_sectors: f64,
}

impl DiscGeometry {
    /// Volume identifier as printable ASCII.
    pub fn identifier_str(&self) -> String {
        iso360_core::util::read_ascii_fixed(&self.identifier)
    }

    /// Whole sectors in the volume (partial trailing sector dropped).
    pub fn whole_volume_sectors(&self) -> u64 {
        self.volume_size / self.sector_size as u64
    }

    /// Absolute image offset of the root directory.
    pub fn root_dir_offset(&self) -> u64 {
        self.sector_offset(self.root_dir_sector)
    }

    /// Absolute image offset of a volume-relative sector.
    pub fn sector_offset(&self, sector: u32) -> u64 {
        self.root_offset as u64 + sector as u64 * self.sector_size as u64
    }
}

/// Check whether the signature sits at `layout`'s descriptor offset.
///
/// A descriptor that would lie past the end of the image simply doesn't
/// match. Any other read failure is returned.
fn has_signature<R: Read + Seek>(
    source: &mut ByteSource<R>,
    layout: DiscLayout,
) -> Result<bool, ReadError> {
    match source.read_array::<20>(layout.descriptor_offset()) {
        Ok(sig) => Ok(&sig == MEDIA_SIGNATURE),
        Err(ReadError::TruncatedRead { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Find which layout the image uses without reading the geometry.
///
/// Candidates are tried in [`PROBE_ORDER`]; the first match wins.
pub fn probe_layout<R: Read + Seek>(
    source: &mut ByteSource<R>,
) -> Result<Option<DiscLayout>, ReadError> {
    for layout in PROBE_ORDER {
        if has_signature(source, layout)? {
            return Ok(Some(layout));
        }
    }
    Ok(None)
}

/// Detect the disc layout and read the volume geometry.
pub fn detect<R: Read + Seek>(source: &mut ByteSource<R>) -> Result<DiscGeometry, LayoutError> {
    let layout = probe_layout(source)?.ok_or(LayoutError::UnknownLayout)?;
    if layout == DiscLayout::Xsf {
        return Err(LayoutError::UnsupportedLegacyLayout);
    }
    log::debug!(
        "{} layout at root offset 0x{:X}",
        layout.name(),
        layout.root_offset()
    );

    let descriptor = layout.descriptor_offset();
    let identifier = source.read_array::<20>(descriptor)?;
    let root_dir_sector = source.read_u32_le(descriptor + 20)?;
    let root_dir_size = source.read_u32_le(descriptor + 24)?;

    let root_offset = layout.root_offset();
    let image_size = source.len();
    let volume_size = image_size.saturating_sub(root_offset as u64);

    Ok(DiscGeometry {
        layout,
        sector_size: SECTOR_SIZE,
        root_offset,
        identifier,
        root_dir_sector,
        root_dir_size,
        image_size,
        volume_size,
        volume_sectors: volume_size as f64 / SECTOR_SIZE as f64,
    })
}

#[cfg(test)]
#[path = "tests/xgd_tests.rs"]
mod tests;
