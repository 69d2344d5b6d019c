//! Cached, self-refreshing title lookup.

use iso360_core::NameLookup;

use crate::cache::{self, Downloader, HttpDownloader};
use crate::settings::LookupSettings;
use crate::table::GameNameTable;

/// Resolves media ids to titles using the cached table.
///
/// The table is loaded on the first lookup. Downloads happen at most twice
/// per instance: once up front (when forced or missing) and once on a miss
/// against a stale local copy. Download failures are logged and the lookup
/// falls back to whatever is on disk.
pub struct GameNameLookup {
    settings: LookupSettings,
    downloader: Box<dyn Downloader>,
    table: Option<GameNameTable>,
    loaded: bool,
    refreshed: bool,
}

impl GameNameLookup {
    pub fn new(settings: LookupSettings) -> Self {
        Self::with_downloader(settings, Box::new(HttpDownloader))
    }

    pub fn with_downloader(settings: LookupSettings, downloader: Box<dyn Downloader>) -> Self {
        Self {
            settings,
            downloader,
            table: None,
            loaded: false,
            refreshed: false,
        }
    }

    pub fn settings(&self) -> &LookupSettings {
        &self.settings
    }

    /// The loaded table, if any.
    pub fn table(&self) -> Option<&GameNameTable> {
        self.table.as_ref()
    }

    fn ensure_loaded(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;

        let missing = !self.settings.local.exists();
        if self.settings.force_update || (missing && self.settings.download_if_missing) {
            // A fresh copy leaves nothing to refresh later.
            self.refreshed = self.try_fetch();
        }
        self.reload();
    }

    fn try_fetch(&self) -> bool {
        match cache::fetch(&self.settings, self.downloader.as_ref()) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Could not update title table: {e}");
                false
            }
        }
    }

    fn reload(&mut self) {
        if !self.settings.local.exists() {
            log::debug!("No title table at {}", self.settings.local.display());
            self.table = None;
            return;
        }
        self.table = match GameNameTable::from_file(&self.settings.local) {
            Ok(table) => Some(table),
            Err(e) => {
                log::warn!(
                    "Could not read title table {}: {e}",
                    self.settings.local.display()
                );
                None
            }
        };
    }

    fn find(&self, media_id: &str) -> Option<String> {
        self.table
            .as_ref()
            .and_then(|t| t.find(media_id))
            .map(str::to_string)
    }
}

impl NameLookup for GameNameLookup {
    fn lookup(&mut self, media_id: &str) -> Option<String> {
        self.ensure_loaded();
        if let Some(name) = self.find(media_id) {
            return Some(name);
        }

        if self.refreshed || !self.settings.update_if_no_match || !cache::is_stale(&self.settings) {
            return None;
        }
        self.refreshed = true;

        log::debug!("{media_id} not in title table, refreshing");
        if self.try_fetch() {
            self.reload();
        }
        self.find(media_id)
    }
}

#[cfg(test)]
#[path = "tests/lookup_tests.rs"]
mod tests;
