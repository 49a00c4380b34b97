//! Error types and handling for bundlesync
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`transport`]: Network fetch errors
//! - [`manifest`]: Manifest parsing errors
//! - [`archive`]: Archive expansion errors
//! - [`fs`]: File system errors
//! - [`cache`]: Cache errors
//!
//! Only [`SyncError::MissingToken`] and [`SyncError::InvalidApiBase`] are fatal.
//! Everything else is logged by the caller and the run carries on, so a build
//! without network access is never blocked.

pub mod archive;
pub mod cache;
pub mod fs;
pub mod manifest;
pub mod transport;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for bundlesync operations
#[derive(Error, Diagnostic, Debug)]
pub enum SyncError {
    // Usage errors
    #[error("No API token supplied")]
    #[diagnostic(
        code(bundlesync::usage::missing_token),
        help("Supply the API token as the first argument: bundlesync <API_TOKEN> [-local] [-verbose]")
    )]
    MissingToken,

    #[error("Invalid API base URL '{url}': {reason}")]
    #[diagnostic(code(bundlesync::usage::invalid_api_base))]
    InvalidApiBase { url: String, reason: String },

    // Transport errors
    #[error("Request to {url} failed: {reason}")]
    #[diagnostic(
        code(bundlesync::transport::request_failed),
        help("Verify that your network connection is established and working")
    )]
    Transport { url: String, reason: String },

    #[error("Request to {url} returned HTTP {status}")]
    #[diagnostic(code(bundlesync::transport::http_status))]
    HttpStatus { url: String, status: u16 },

    #[error("Received no data from {url}")]
    #[diagnostic(code(bundlesync::transport::empty_response))]
    EmptyResponse { url: String },

    // Manifest errors
    #[error("Invalid JSON returned (received {bytes} bytes): {reason}")]
    #[diagnostic(
        code(bundlesync::manifest::invalid_json),
        help("Check your API token and network connection")
    )]
    InvalidManifest { bytes: usize, reason: String },

    #[error("Skipping malformed bundle entry #{index}: {reason}")]
    #[diagnostic(code(bundlesync::manifest::malformed_entry))]
    MalformedDescriptor { index: usize, reason: String },

    // Archive errors
    #[error("Failed to expand archive {path}: {reason}")]
    #[diagnostic(code(bundlesync::archive::expand_failed))]
    ArchiveFailed { path: String, reason: String },

    // File system errors
    #[error("Could not create directory {path}: {reason}")]
    #[diagnostic(code(bundlesync::fs::create_dir_failed))]
    CreateDirFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(bundlesync::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Could not delete {path}: {reason}")]
    #[diagnostic(code(bundlesync::fs::remove_failed))]
    RemoveFailed { path: String, reason: String },

    #[error("Could not copy {from} to {to}: {reason}")]
    #[diagnostic(code(bundlesync::fs::copy_failed))]
    CopyFailed {
        from: String,
        to: String,
        reason: String,
    },

    // Cache errors
    #[error("Cache operation failed: {message}")]
    #[diagnostic(code(bundlesync::cache::operation_failed))]
    CacheOperationFailed { message: String },
}

impl SyncError {
    /// Whether the run may continue after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            SyncError::MissingToken | SyncError::InvalidApiBase { .. }
        )
    }

    /// Replace the URL carried by a transport error.
    ///
    /// Used to keep the API token out of log output.
    #[must_use]
    pub fn with_url(self, display_url: impl Into<String>) -> Self {
        match self {
            SyncError::Transport { reason, .. } => SyncError::Transport {
                url: display_url.into(),
                reason,
            },
            SyncError::HttpStatus { status, .. } => SyncError::HttpStatus {
                url: display_url.into(),
                status,
            },
            SyncError::EmptyResponse { .. } => SyncError::EmptyResponse {
                url: display_url.into(),
            },
            other => other,
        }
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(ToString::to_string)
            .unwrap_or_else(|| "unknown".to_string());
        SyncError::Transport {
            url,
            reason: err.without_url().to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SyncError>;
