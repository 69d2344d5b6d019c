//! On-disk cache of the title table.
//!
//! The table lives at [`LookupSettings::local`] with a JSON sidecar next to
//! it (`GameNameLookup.csv.meta.json`) recording where and when it came from.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::settings::LookupSettings;
use crate::table::GameNameTable;

/// Metadata about the cached table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedTable {
    pub source: String,
    /// RFC 3339 download time.
    pub downloaded: String,
    pub file_size: u64,
    pub entry_count: usize,
}

/// State of the local table for display purposes.
#[derive(Debug, Clone)]
pub struct CacheStatus {
    pub path: PathBuf,
    pub file_size: u64,
    pub age: Option<Duration>,
    /// Absent when the table was placed by hand.
    pub meta: Option<CachedTable>,
}

/// Fetches the remote table.
pub trait Downloader {
    fn download(&self, url: &str) -> Result<Vec<u8>, LookupError>;
}

/// Blocking HTTP download.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpDownloader;

impl Downloader for HttpDownloader {
    fn download(&self, url: &str) -> Result<Vec<u8>, LookupError> {
        let response = reqwest::blocking::get(url)
            .map_err(|e| LookupError::download(format!("Failed to download '{url}': {e}")))?;

        if !response.status().is_success() {
            return Err(LookupError::download(format!(
                "HTTP {} for title table ({url})",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| LookupError::download(format!("Failed to read response from '{url}': {e}")))?;
        Ok(bytes.to_vec())
    }
}

/// Sidecar path for a table file.
pub fn meta_path(local: &Path) -> PathBuf {
    let mut name = local.as_os_str().to_owned();
    name.push(".meta.json");
    PathBuf::from(name)
}

/// Download the table to `settings.local` and record its metadata.
pub fn fetch(settings: &LookupSettings, downloader: &dyn Downloader) -> Result<CachedTable, LookupError> {
    log::info!("Downloading title table from {}", settings.url);
    let bytes = downloader.download(&settings.url)?;

    let table = GameNameTable::parse(&String::from_utf8_lossy(&bytes));
    if table.is_empty() {
        return Err(LookupError::download(format!(
            "{} did not contain any title rows",
            settings.url
        )));
    }

    if let Some(parent) = settings.local.parent() {
        fs::create_dir_all(parent)?;
    }

    // Write beside the target, then rename over it.
    let tmp = settings.local.with_extension("csv.tmp");
    fs::write(&tmp, &bytes)?;
    fs::rename(&tmp, &settings.local)?;

    let meta = CachedTable {
        source: settings.url.clone(),
        downloaded: chrono::Utc::now().to_rfc3339(),
        file_size: bytes.len() as u64,
        entry_count: table.len(),
    };
    fs::write(meta_path(&settings.local), serde_json::to_string_pretty(&meta)?)?;

    log::debug!(
        "Cached {} title rows at {}",
        meta.entry_count,
        settings.local.display()
    );
    Ok(meta)
}

/// Describe the local table, or `None` when there isn't one.
pub fn info(settings: &LookupSettings) -> Result<Option<CacheStatus>, LookupError> {
    let path = &settings.local;
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let meta = match fs::read_to_string(meta_path(path)) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(meta) => Some(meta),
            Err(e) => {
                log::warn!("Ignoring unreadable cache metadata: {e}");
                None
            }
        },
        Err(_) => None,
    };

    Ok(Some(CacheStatus {
        path: path.clone(),
        file_size: metadata.len(),
        age: file_age(path),
        meta,
    }))
}

/// Remove the local table and its sidecar. Returns the bytes freed.
pub fn clear(settings: &LookupSettings) -> Result<u64, LookupError> {
    let mut total_size = 0u64;
    for path in [settings.local.clone(), meta_path(&settings.local)] {
        if let Ok(m) = fs::metadata(&path) {
            total_size += m.len();
            fs::remove_file(&path)?;
        }
    }
    Ok(total_size)
}

/// Time since `path` was last modified.
pub fn file_age(path: &Path) -> Option<Duration> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    Some(
        SystemTime::now()
            .duration_since(modified)
            .unwrap_or_default(),
    )
}

/// Whether the local table is old enough to be refreshed.
pub fn is_stale(settings: &LookupSettings) -> bool {
    file_age(&settings.local).is_some_and(|age| age >= settings.min_age())
}

#[cfg(test)]
#[path = "tests/cache_tests.rs"]
mod tests;
