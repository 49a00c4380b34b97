//! Cache statistics
//!
//! Reported at the end of a verbose run so a developer can see how much the
//! cache holds and whether stale versions are piling up.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Result, cache};

use super::paths;

/// Cache statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of distinct bundle names cached
    pub bundles: usize,
    /// Number of cached versions across all bundles
    pub versions: usize,
    /// Total size in bytes
    pub total_size: u64,
}

impl CacheStats {
    /// Format total size as human-readable string
    pub fn formatted_size(&self) -> String {
        #[allow(clippy::cast_precision_loss)]
        let size = self.total_size as f64;
        if size < 1024.0 {
            format!("{} B", self.total_size)
        } else if size < 1024.0 * 1024.0 {
            format!("{:.1} KB", size / 1024.0)
        } else if size < 1024.0 * 1024.0 * 1024.0 {
            format!("{:.1} MB", size / (1024.0 * 1024.0))
        } else {
            format!("{:.1} GB", size / (1024.0 * 1024.0 * 1024.0))
        }
    }
}

/// Get cache statistics for the cache rooted at `root`
///
/// Scratch directories of in-flight downloads are not counted.
pub fn cache_stats(root: &Path) -> Result<CacheStats> {
    if !root.exists() {
        return Ok(CacheStats::default());
    }

    let mut stats = CacheStats::default();

    for entry in fs::read_dir(root)
        .map_err(|e| cache::operation_failed(format!("Failed to read cache directory: {e}")))?
    {
        let entry =
            entry.map_err(|e| cache::operation_failed(format!("Failed to read entry: {e}")))?;

        if !entry.path().is_dir() {
            continue;
        }
        stats.bundles += 1;

        let Ok(version_entries) = fs::read_dir(entry.path()) else {
            continue;
        };

        for version_entry in version_entries.flatten() {
            let name = version_entry.file_name();
            if !version_entry.path().is_dir() || name.to_string_lossy().starts_with(paths::PARTIAL_PREFIX)
            {
                continue;
            }
            stats.versions += 1;
            stats.total_size += dir_size(&version_entry.path());
        }
    }

    Ok(stats)
}

/// Calculate directory size recursively
fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}
