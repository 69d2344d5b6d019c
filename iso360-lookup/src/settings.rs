//! Lookup settings, read from the `[lookup]` table of
//! `~/.config/iso360/settings.toml`.
//!
//! ```toml
//! [lookup]
//! local = "/path/to/GameNameLookup.csv"
//! url = "http://example.com/GameNameLookup.csv"
//! force_update = false
//! download_if_missing = true
//! update_if_no_match = true
//! min_age_secs = 86400
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Where the title table has historically been published.
pub const DEFAULT_TABLE_URL: &str = "http://abgx360.net/Apps/Stealth360/GameNameLookup.csv";

const TABLE_FILE_NAME: &str = "GameNameLookup.csv";

/// Cache and refresh policy for the title table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupSettings {
    /// Local copy of the table.
    pub local: PathBuf,
    /// Remote copy, fetched on demand.
    pub url: String,
    /// Always download before the first lookup.
    pub force_update: bool,
    /// Download when there is no local copy.
    pub download_if_missing: bool,
    /// Re-download once when a media id isn't found and the local copy is stale.
    pub update_if_no_match: bool,
    /// Age after which the local copy counts as stale.
    pub min_age_secs: u64,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            local: default_table_path(),
            url: DEFAULT_TABLE_URL.to_string(),
            force_update: false,
            download_if_missing: true,
            update_if_no_match: true,
            min_age_secs: 60 * 60 * 24,
        }
    }
}

impl LookupSettings {
    /// Settings that never touch the network.
    pub fn offline(mut self) -> Self {
        self.force_update = false;
        self.download_if_missing = false;
        self.update_if_no_match = false;
        self
    }

    pub fn with_local(mut self, path: impl Into<PathBuf>) -> Self {
        self.local = path.into();
        self
    }

    pub fn min_age(&self) -> Duration {
        Duration::from_secs(self.min_age_secs)
    }

    /// Parse the `[lookup]` table out of a settings document.
    ///
    /// A document without the table yields the defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, LookupError> {
        #[derive(Deserialize, Default)]
        struct Document {
            #[serde(default)]
            lookup: Option<LookupSettings>,
        }
        let doc: Document = toml::from_str(contents)?;
        Ok(doc.lookup.unwrap_or_default())
    }

    /// Load from `path`, falling back to the defaults when the file is absent.
    pub fn load_from(path: &Path) -> Result<Self, LookupError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Load from the canonical settings file.
    pub fn load() -> Result<Self, LookupError> {
        Self::load_from(&settings_path())
    }
}

/// Canonical path to the settings file: `~/.config/iso360/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("iso360").join("settings.toml")
}

/// Default local table path: `~/.cache/iso360/GameNameLookup.csv`.
pub fn default_table_path() -> PathBuf {
    let cache = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."));
    cache.join("iso360").join(TABLE_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = LookupSettings::default();
        assert_eq!(settings.url, DEFAULT_TABLE_URL);
        assert!(!settings.force_update);
        assert!(settings.download_if_missing);
        assert!(settings.update_if_no_match);
        assert_eq!(settings.min_age(), Duration::from_secs(86400));
        assert!(settings.local.ends_with("iso360/GameNameLookup.csv"));
    }

    #[test]
    fn test_partial_table_keeps_other_defaults() {
        let settings = LookupSettings::from_toml_str(
            "[lookup]\nforce_update = true\nmin_age_secs = 60\nlocal = \"/tmp/names.csv\"\n",
        )
        .unwrap();
        assert!(settings.force_update);
        assert_eq!(settings.min_age_secs, 60);
        assert_eq!(settings.local, PathBuf::from("/tmp/names.csv"));
        assert_eq!(settings.url, DEFAULT_TABLE_URL);
        assert!(settings.download_if_missing);
    }

    #[test]
    fn test_document_without_lookup_table() {
        let settings = LookupSettings::from_toml_str("[library]\ncurrent_root = \"/roms\"\n").unwrap();
        assert_eq!(settings, LookupSettings::default());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            LookupSettings::from_toml_str("[lookup\n"),
            Err(LookupError::Toml(_))
        ));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LookupSettings::load_from(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings, LookupSettings::default());
    }

    #[test]
    fn test_offline() {
        let settings = LookupSettings::default().offline();
        assert!(!settings.force_update);
        assert!(!settings.download_if_missing);
        assert!(!settings.update_if_no_match);
    }
}
