//! Staging cached bundles into the application
//!
//! The output tree mirrors the cache: `<output root>/<name>/<version>/`.
//! Staging a bundle always starts by deleting `<output root>/<name>`, so at
//! most one version of each bundle ships with the application.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::cache::CacheStore;
use crate::common::fs::copy_item;
use crate::error::{Result, fs as fs_error};

/// Result of staging one bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedBundle {
    /// `<output root>/<name>/<version>`
    pub path: PathBuf,
    /// Top-level items copied
    pub copied: usize,
    /// Top-level items that failed to copy
    pub failed: usize,
}

/// Sole writer of the application's staged bundle tree
#[derive(Debug, Clone)]
pub struct Stager {
    output_root: PathBuf,
}

impl Stager {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Replace every staged version of `name` with the cached `version`.
    ///
    /// The cache entry is listed before anything is deleted, so an unreadable
    /// entry leaves the staged copy untouched. Failing to delete the old
    /// versions or to copy an individual item is logged and does not stop the
    /// remaining items. Failing to create the version directory, or to list
    /// the cache entry, is returned.
    pub fn stage(&self, cache: &CacheStore, name: &str, version: &str) -> Result<StagedBundle> {
        let items = cache.entries(name, version)?;

        let bundle_dir = self.output_root.join(name);
        if bundle_dir.exists() {
            debug!("Deleting bundle {} in app bundle dir...", name);
            if let Err(e) = fs::remove_dir_all(&bundle_dir) {
                warn!("{}", fs_error::remove_failed(&bundle_dir, e));
            }
        }

        let version_dir = bundle_dir.join(version);
        fs::create_dir_all(&version_dir)
            .map_err(|e| fs_error::create_dir_failed(&version_dir, e))?;

        let mut staged = StagedBundle {
            path: version_dir,
            copied: 0,
            failed: 0,
        };

        for item in items {
            let Some(file_name) = item.file_name() else {
                continue;
            };
            let target = staged.path.join(file_name);
            match copy_item(&item, &target) {
                Ok(()) => staged.copied += 1,
                Err(e) => {
                    warn!(
                        "Could not copy cached bundle {}'s file {}: {}",
                        name,
                        file_name.to_string_lossy(),
                        fs_error::copy_failed(&item, &target, e)
                    );
                    staged.failed += 1;
                }
            }
        }

        debug!(
            "Staged {} {} ({} items) into {}",
            name,
            version,
            staged.copied,
            staged.path.display()
        );
        Ok(staged)
    }
}
