//! Xbox 360 disc image analysis.
//!
//! - [`xgd`]: disc layout detection and volume geometry
//! - [`directory`]: root directory scan for a single named entry
//! - [`xex`]: XEX2 header parsing down to the execution info block
//! - [`xbox360`]: the analyzer tying the three together

pub mod directory;
pub mod xbox360;
pub mod xex;
pub mod xgd;

pub use directory::{DEFAULT_XEX, DirectoryEntry};
pub use xbox360::{DiscReport, Xbox360Analyzer};
pub use xex::ExecutableMetadata;
pub use xgd::{DiscGeometry, DiscLayout};

#[cfg(test)]
#[path = "tests/sparse.rs"]
mod sparse;
