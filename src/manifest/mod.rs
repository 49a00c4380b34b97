//! Bundle manifest
//!
//! The manifest service answers with
//!
//! ```json
//! {"bundles": [{"name": "ui-kit", "version": "1.0", "url": "https://.../ui-kit-1.0.zip"}]}
//! ```
//!
//! Parsing is lenient where the service is allowed to be quiet and strict
//! per entry: a missing `bundles` array means "nothing to sync", while a
//! malformed entry is dropped on its own without discarding its siblings.

pub mod client;

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::paths::{FALLBACK_PAYLOAD_NAME, is_safe_component};
use crate::error::{Result, manifest};

pub use client::ManifestClient;

/// One bundle listed by the manifest service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BundleDescriptor {
    /// Bundle name, unique within one manifest
    pub name: String,
    /// Opaque version string
    pub version: String,
    /// Absolute download URL of the payload
    pub url: String,
}

impl BundleDescriptor {
    /// Check that the descriptor can be cached and staged safely.
    fn validate(&self) -> std::result::Result<(), String> {
        if !is_safe_component(&self.name) {
            return Err(format!("invalid bundle name '{}'", self.name));
        }
        if !is_safe_component(&self.version) {
            return Err(format!(
                "invalid version '{}' for bundle '{}'",
                self.version, self.name
            ));
        }
        reqwest::Url::parse(&self.url)
            .map_err(|e| format!("invalid url '{}' for bundle '{}': {}", self.url, self.name, e))?;
        Ok(())
    }

    /// File name the payload is saved under: the URL's last path segment.
    pub fn payload_file_name(&self) -> String {
        reqwest::Url::parse(&self.url)
            .ok()
            .and_then(|url| {
                url.path_segments()
                    .and_then(|mut segments| segments.next_back().map(str::to_string))
            })
            .filter(|segment| is_safe_component(segment))
            .unwrap_or_else(|| FALLBACK_PAYLOAD_NAME.to_string())
    }
}

/// Parse a manifest response body.
///
/// Fails only when the body is not a JSON object. An absent or non-array
/// `bundles` field yields no bundles; malformed or duplicate entries are
/// skipped with a warning.
pub fn parse_manifest(body: &[u8]) -> Result<Vec<BundleDescriptor>> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| manifest::invalid_json(body.len(), e))?;

    let Some(object) = value.as_object() else {
        return Err(manifest::invalid_json(
            body.len(),
            "expected a JSON object at the top level",
        ));
    };

    if let Ok(pretty) = serde_json::to_string_pretty(&value) {
        debug!("JSON Response: {}", pretty);
    }

    let Some(entries) = object.get("bundles").and_then(Value::as_array) else {
        debug!("Manifest lists no bundles");
        return Ok(Vec::new());
    };

    let mut seen = HashSet::new();
    let mut bundles = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let descriptor = match BundleDescriptor::deserialize(entry) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                warn!("{}", manifest::malformed_descriptor(index, e));
                continue;
            }
        };

        if let Err(reason) = descriptor.validate() {
            warn!("{}", manifest::malformed_descriptor(index, reason));
            continue;
        }

        if !seen.insert(descriptor.name.clone()) {
            warn!(
                "{}",
                manifest::malformed_descriptor(
                    index,
                    format!("duplicate bundle name '{}'", descriptor.name)
                )
            );
            continue;
        }

        bundles.push(descriptor);
    }

    Ok(bundles)
}
