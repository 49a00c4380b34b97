//! Run configuration for bundlesync
//!
//! Everything the engine needs is collected into a [`SyncConfig`] once at
//! startup and passed by reference into each component:
//! - [`environment`] - paths and build flavour supplied by the host build
//! - [`identity`] - application identity read from the property list

pub mod environment;
pub mod identity;

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;
use crate::error::{Result, SyncError};

pub use environment::BuildEnvironment;
pub use identity::AppIdentity;

/// Production manifest service
pub const PRODUCTION_API_BASE: &str = "https://api.launchkit.io";

/// Manifest service run on the developer's machine (`-local`)
pub const LOCAL_API_BASE: &str = "http://localhost:9101";

/// What to do when the manifest itself cannot be retrieved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManifestFailurePolicy {
    /// Log a warning and exit successfully so the host build continues
    #[default]
    Ignore,
    /// Exit with a failure status
    Fail,
}

/// Complete configuration for one synchronization run
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Manifest service base URL, without a trailing slash
    pub api_base: String,
    /// Identity sent with the manifest query
    pub identity: AppIdentity,
    /// Root of the on-disk bundle cache
    pub cache_root: PathBuf,
    /// Root of the staged resources inside the packaged application
    pub output_root: PathBuf,
    pub manifest_failure: ManifestFailurePolicy,
    /// Explicit HTTP timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,
    pub verbose: bool,
}

impl SyncConfig {
    /// Build the configuration from parsed arguments and the build environment.
    pub fn from_cli(cli: &Cli, env: &BuildEnvironment) -> Result<Self> {
        let api_base = resolve_api_base(cli.api_base.as_deref(), cli.local)?;
        let identity = AppIdentity::from_info_plist(env.info_plist.as_deref(), env.debug_build);

        Ok(Self {
            api_base,
            identity,
            cache_root: cli.cache_dir.clone().unwrap_or_else(|| env.cache_root()),
            output_root: cli.output_dir.clone().unwrap_or_else(|| env.output_root()),
            manifest_failure: if cli.fail_on_manifest_error {
                ManifestFailurePolicy::Fail
            } else {
                ManifestFailurePolicy::Ignore
            },
            timeout: cli.timeout.map(Duration::from_secs),
            verbose: cli.verbose,
        })
    }
}

/// Pick the manifest service base URL.
///
/// An explicit override wins over `-local`, which wins over production.
pub fn resolve_api_base(override_url: Option<&str>, local: bool) -> Result<String> {
    let base = match override_url {
        Some(url) => url,
        None if local => LOCAL_API_BASE,
        None => PRODUCTION_API_BASE,
    };

    reqwest::Url::parse(base).map_err(|e| SyncError::InvalidApiBase {
        url: base.to_string(),
        reason: e.to_string(),
    })?;

    Ok(base.trim_end_matches('/').to_string())
}
