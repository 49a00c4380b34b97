//! Bundle cache for bundlesync
//!
//! Downloaded bundles are kept between builds so a bundle version is fetched
//! at most once.
//!
//! ## Cache Structure
//!
//! ```text
//! <cache root>/
//! └── <bundle name>/
//!     └── <version>/
//!         └── <expanded payload>
//! ```
//!
//! The existence of `<name>/<version>/` is the only cache-hit signal; its
//! contents are never validated. To keep that signal honest, a download is
//! written and expanded in a hidden scratch directory next to the version
//! directory and renamed into place only once it is complete.

pub mod paths;
pub mod stats;


use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::archive;
use crate::error::{Result, cache, fs as fs_error};

pub use stats::{CacheStats, cache_stats};

/// On-disk store of `(name, version)` bundle entries
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    /// Create a store rooted at `root`. Nothing is created on disk until the
    /// first [`CacheStore::materialize`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the cache
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of a cache entry, whether or not it exists
    pub fn entry_path(&self, name: &str, version: &str) -> PathBuf {
        paths::entry_dir(&self.root, name, version)
    }

    /// Whether `name` at `version` is already cached
    pub fn is_cached(&self, name: &str, version: &str) -> bool {
        self.entry_path(name, version).is_dir()
    }

    /// Store a downloaded payload as the cache entry for `name` at `version`.
    ///
    /// The payload is written under `source_file_name`; archives are expanded
    /// and then deleted. Returns the entry directory.
    pub fn materialize(
        &self,
        name: &str,
        version: &str,
        payload: &[u8],
        source_file_name: &str,
    ) -> Result<PathBuf> {
        for component in [name, version, source_file_name] {
            if !paths::is_safe_component(component) {
                return Err(cache::operation_failed(format!(
                    "Refusing to cache '{component}': not a single path component"
                )));
            }
        }

        let bundle_dir = paths::bundle_dir(&self.root, name);
        fs::create_dir_all(&bundle_dir)
            .map_err(|e| fs_error::create_dir_failed(&bundle_dir, e))?;

        let scratch = tempfile::Builder::new()
            .prefix(paths::PARTIAL_PREFIX)
            .tempdir_in(&bundle_dir)
            .map_err(|e| fs_error::create_dir_failed(&bundle_dir, e))?;

        let payload_path = scratch.path().join(source_file_name);
        fs::write(&payload_path, payload).map_err(|e| fs_error::write_failed(&payload_path, e))?;

        if archive::is_archive(source_file_name) {
            archive::expand(&payload_path)?;
            if let Err(e) = fs::remove_file(&payload_path) {
                warn!("Couldn't remove the archive after expanding it: {}", e);
            }
        }

        let entry = self.entry_path(name, version);
        if entry.exists() {
            if let Err(e) = fs::remove_dir_all(&entry) {
                warn!("Couldn't delete existing cache entry {}: {}", entry.display(), e);
            }
        }

        fs::rename(scratch.path(), &entry).map_err(|e| {
            cache::operation_failed(format!(
                "Failed to move download into {}: {}",
                entry.display(),
                e
            ))
        })?;

        debug!("Saved to: {}", entry.display());
        Ok(entry)
    }

    /// Top-level, non-hidden items of a cache entry, sorted by name
    pub fn entries(&self, name: &str, version: &str) -> Result<Vec<PathBuf>> {
        let entry = self.entry_path(name, version);
        let read_dir = fs::read_dir(&entry).map_err(|e| {
            cache::operation_failed(format!(
                "Failed to read cache entry {}: {}",
                entry.display(),
                e
            ))
        })?;

        let mut items: Vec<PathBuf> = read_dir
            .filter_map(|item| match item {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!("Skipping unreadable item in {}: {}", entry.display(), e);
                    None
                }
            })
            .filter(|item| !paths::is_hidden(&item.file_name().to_string_lossy()))
            .map(|item| item.path())
            .collect();
        items.sort();

        Ok(items)
    }
}
