//! Outcome of a synchronization run

use crate::stage::StagedBundle;

/// Where the staged copy of a bundle came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
    /// Already in the cache; no network access
    Cached,
    /// Downloaded during this run
    Downloaded,
}

/// What happened to one manifest entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleOutcome {
    Staged {
        source: CacheSource,
        staged: StagedBundle,
    },
    /// Nothing staged; any previously staged version was left untouched
    /// unless staging itself had already started
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleReport {
    pub name: String,
    pub version: String,
    pub outcome: BundleOutcome,
}

/// Everything a run did, in manifest order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Set when the manifest could not be retrieved and the run was skipped
    pub manifest_error: Option<String>,
    pub bundles: Vec<BundleReport>,
}

impl SyncReport {
    /// Report for a run that never got a manifest
    pub fn manifest_unavailable(reason: impl Into<String>) -> Self {
        Self {
            manifest_error: Some(reason.into()),
            bundles: Vec::new(),
        }
    }

    pub fn downloaded(&self) -> usize {
        self.count_source(CacheSource::Downloaded)
    }

    pub fn cache_hits(&self) -> usize {
        self.count_source(CacheSource::Cached)
    }

    pub fn skipped(&self) -> usize {
        self.bundles
            .iter()
            .filter(|b| matches!(b.outcome, BundleOutcome::Skipped { .. }))
            .count()
    }

    /// Individual items that failed to copy into the output tree
    pub fn copy_failures(&self) -> usize {
        self.bundles
            .iter()
            .map(|b| match &b.outcome {
                BundleOutcome::Staged { staged, .. } => staged.failed,
                BundleOutcome::Skipped { .. } => 0,
            })
            .sum()
    }

    fn count_source(&self, wanted: CacheSource) -> usize {
        self.bundles
            .iter()
            .filter(|b| matches!(b.outcome, BundleOutcome::Staged { source, .. } if source == wanted))
            .count()
    }
}
