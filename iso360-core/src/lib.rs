//! Shared building blocks for Xbox 360 disc analysis.
//!
//! Holds the error taxonomy, the bounds-checked [`ByteSource`], small binary
//! readers used by every parser, and the [`NameLookup`] seam through which a
//! title-name table is plugged into the analyzer.

use std::io::{Read, Seek};

pub mod error;
pub mod source;
pub mod util;

pub use error::{AnalysisError, HeaderError, LayoutError, ReadError, ScanError};
pub use source::ByteSource;

/// Fixed sector size of every supported disc layout.
pub const SECTOR_SIZE: u32 = 0x800;

/// A reader that implements both Read and Seek.
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// Resolves a media identifier to a human-readable title.
///
/// The analyzer only ever asks; caching and remote fetching are
/// up to the implementor. `media_id` is the uppercase hex rendering
/// (e.g. `"DEADBEEF"`).
pub trait NameLookup {
    fn lookup(&mut self, media_id: &str) -> Option<String>;
}

/// In-memory lookup keyed by exact media id. Handy for tests and for callers
/// that already hold a resolved table.
impl NameLookup for std::collections::HashMap<String, String> {
    fn lookup(&mut self, media_id: &str) -> Option<String> {
        self.get(media_id).cloned()
    }
}
