//! Media id → game title lookup.
//!
//! Titles come from a comma-separated table (one game per row, title in the
//! first column, media ids somewhere in the rest). The table is cached on
//! disk and refreshed from a remote copy according to [`LookupSettings`].

pub mod cache;
pub mod error;
pub mod lookup;
pub mod settings;
pub mod table;

pub use cache::{CacheStatus, CachedTable, Downloader, HttpDownloader};
pub use error::LookupError;
pub use lookup::GameNameLookup;
pub use settings::LookupSettings;
pub use table::GameNameTable;
