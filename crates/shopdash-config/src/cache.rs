//! Live configuration shared between the refresh loop and its readers.

use crate::loader::ConfigLoader;
use crate::schema::Config;
use arc_swap::ArcSwap;
use shopdash_common::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Holds the active configuration behind an `ArcSwap` for lock-free reads.
///
/// When built with a source file, [`ConfigCache::reload`] re-reads it between refresh
/// cycles; an invalid edit is reported and the previous configuration stays active.
pub struct ConfigCache {
    config: ArcSwap<Config>,
    source: Option<PathBuf>,
}

impl ConfigCache {
    /// Creates a cache with no backing file.
    pub fn new(config: Config) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
            source: None,
        }
    }

    /// Creates a cache that can reload from `path`.
    pub fn with_source(config: Config, path: impl Into<PathBuf>) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
            source: Some(path.into()),
        }
    }

    /// The file this cache reloads from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Gets the current configuration.
    pub fn get(&self) -> Arc<Config> {
        self.config.load_full()
    }

    /// Replaces the configuration atomically. Readers holding the old `Arc` keep it.
    pub fn update(&self, config: Config) {
        self.config.store(Arc::new(config));
    }

    /// Re-reads the source file. Returns `Ok(true)` when the configuration changed.
    pub fn reload(&self) -> Result<bool> {
        let Some(path) = self.source.as_deref() else {
            return Ok(false);
        };

        let fresh = match ConfigLoader::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Keeping previous configuration");
                return Err(e);
            }
        };

        if *self.get() == fresh {
            return Ok(false);
        }

        info!(path = %path.display(), "Configuration changed");
        self.update(fresh);
        Ok(true)
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
