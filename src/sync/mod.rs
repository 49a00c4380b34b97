//! Synchronization of remote bundles into the application
//!
//! One run:
//! 1. Retrieve the manifest for the application being built
//! 2. For every listed bundle, in manifest order:
//!    - download and cache it unless `<name>/<version>` is already cached
//!    - replace whatever version is staged in the application with it
//!
//! Bundles are independent: a bundle that cannot be downloaded is skipped,
//! leaving its previously staged version in place, and the run moves on.
//! Whether a missing manifest fails the run is a [`ManifestFailurePolicy`].

pub mod report;


use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::config::{ManifestFailurePolicy, SyncConfig};
use crate::error::{Result, SyncError};
use crate::fetch::Fetcher;
use crate::manifest::{BundleDescriptor, ManifestClient};
use crate::stage::Stager;
use crate::ui::SyncReporter;

pub use report::{BundleOutcome, BundleReport, CacheSource, SyncReport};

/// Runs the fetch-cache-stage pipeline for one build
pub struct Synchronizer<'a> {
    fetcher: &'a dyn Fetcher,
    manifest: ManifestClient,
    cache: CacheStore,
    stager: Stager,
    manifest_failure: ManifestFailurePolicy,
}

impl<'a> Synchronizer<'a> {
    pub fn new(config: &SyncConfig, fetcher: &'a dyn Fetcher) -> Self {
        Self {
            fetcher,
            manifest: ManifestClient::new(config.api_base.clone(), config.identity.clone()),
            cache: CacheStore::new(config.cache_root.clone()),
            stager: Stager::new(config.output_root.clone()),
            manifest_failure: config.manifest_failure,
        }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Synchronize every bundle the manifest lists.
    ///
    /// Returns an error only for an unusable configuration, or for a
    /// manifest failure under [`ManifestFailurePolicy::Fail`].
    pub fn run(&self, token: &str, reporter: &mut dyn SyncReporter) -> Result<SyncReport> {
        let bundles = match self.manifest.fetch(self.fetcher, token) {
            Ok(bundles) => bundles,
            Err(e) => return skip_unavailable_manifest(self.manifest_failure, e),
        };

        info!(
            "Caching {} remote bundle(s) into {}",
            bundles.len(),
            self.stager.output_root().display()
        );
        reporter.start(bundles.len());

        let mut report = SyncReport::default();
        for (index, descriptor) in bundles.iter().enumerate() {
            reporter.bundle_started(&descriptor.name, index + 1, bundles.len());
            let bundle_report = BundleReport {
                name: descriptor.name.clone(),
                version: descriptor.version.clone(),
                outcome: self.sync_bundle(descriptor),
            };
            reporter.bundle_finished(&bundle_report);
            report.bundles.push(bundle_report);
        }

        reporter.finish(&report);
        Ok(report)
    }

    /// Make sure one bundle is cached, then stage it.
    pub fn sync_bundle(&self, descriptor: &BundleDescriptor) -> BundleOutcome {
        let BundleDescriptor { name, version, url } = descriptor;

        let source = if self.cache.is_cached(name, version) {
            debug!(" => {}: {} (cached)", name, url);
            CacheSource::Cached
        } else {
            debug!(" => {}: {} (needs download)", name, url);
            if let Err(reason) = self.download(descriptor) {
                warn!("Skipping bundle {} {}: {}", name, version, reason);
                return BundleOutcome::Skipped { reason };
            }
            CacheSource::Downloaded
        };

        match self.stager.stage(&self.cache, name, version) {
            Ok(staged) => BundleOutcome::Staged { source, staged },
            Err(e) => {
                warn!("Could not stage bundle {} {}: {}", name, version, e);
                BundleOutcome::Skipped {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn download(&self, descriptor: &BundleDescriptor) -> std::result::Result<(), String> {
        debug!("Downloading {}...", descriptor.name);
        let payload = self
            .fetcher
            .get(&descriptor.url)
            .map_err(|e| e.to_string())?;

        self.cache
            .materialize(
                &descriptor.name,
                &descriptor.version,
                &payload,
                &descriptor.payload_file_name(),
            )
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// Decide the run's fate when no manifest can be obtained.
///
/// Non-recoverable errors always fail. Otherwise [`ManifestFailurePolicy::Ignore`]
/// logs a warning and yields an empty report, so the host build continues.
pub fn skip_unavailable_manifest(
    policy: ManifestFailurePolicy,
    error: SyncError,
) -> Result<SyncReport> {
    if !error.is_recoverable() || policy == ManifestFailurePolicy::Fail {
        return Err(error);
    }

    warn!("Error caching remote resources: {}", error);
    warn!("Verify that your network connection is established and working. Skipping for this build.");
    Ok(SyncReport::manifest_unavailable(error.to_string()))
}
