//! Manifest service client

use reqwest::Url;
use tracing::{debug, info};

use crate::config::AppIdentity;
use crate::error::{Result, SyncError};
use crate::fetch::Fetcher;

use super::{BundleDescriptor, parse_manifest};

/// Path of the manifest endpoint below the API base
const MANIFEST_PATH: &str = "/v1/bundles";

/// Stand-in for the API token in anything that gets logged
const REDACTED: &str = "REDACTED";

/// Queries the manifest service for the bundles of one application
#[derive(Debug, Clone)]
pub struct ManifestClient {
    api_base: String,
    identity: AppIdentity,
}

impl ManifestClient {
    pub fn new(api_base: impl Into<String>, identity: AppIdentity) -> Self {
        Self {
            api_base: api_base.into(),
            identity,
        }
    }

    /// Manifest query URL with every parameter percent-encoded
    pub fn query_url(&self, token: &str) -> Result<Url> {
        let endpoint = format!("{}{}", self.api_base.trim_end_matches('/'), MANIFEST_PATH);
        Url::parse_with_params(
            &endpoint,
            [
                ("token", token),
                ("bundle_id", self.identity.bundle_id.as_str()),
                ("version", self.identity.short_version.as_str()),
                ("build", self.identity.build_number.as_str()),
                ("debug_build", self.identity.debug_flag()),
            ],
        )
        .map_err(|e| SyncError::InvalidApiBase {
            url: self.api_base.clone(),
            reason: e.to_string(),
        })
    }

    /// Retrieve and parse the manifest, blocking until done.
    ///
    /// On error there are no bundles to process; the caller decides whether
    /// that fails the run.
    pub fn fetch(&self, fetcher: &dyn Fetcher, token: &str) -> Result<Vec<BundleDescriptor>> {
        let url = self.query_url(token)?;
        let display_url = self.query_url(REDACTED)?.to_string();
        info!("Retrieving remote bundles manifest");
        debug!("URL: {}", display_url);

        let body = fetcher
            .get(url.as_str())
            .map_err(|e| e.with_url(display_url.clone()))?;

        let bundles = parse_manifest(&body)?;
        debug!("Manifest lists {} bundle(s)", bundles.len());
        Ok(bundles)
    }
}
