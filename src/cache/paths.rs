//! Cache path layout
//!
//! ```text
//! <cache root>/
//! └── <bundle name>/
//!     ├── <version>/
//!     │   └── <expanded payload>
//!     └── .partial-XXXXXX/      (only while a download is being materialized)
//! ```

use std::path::{Path, PathBuf};

/// Prefix of the scratch directories used while materializing a download
pub const PARTIAL_PREFIX: &str = ".partial-";

/// File name used when a payload URL has no usable last path segment
pub const FALLBACK_PAYLOAD_NAME: &str = "payload";

/// Directory holding every cached version of one bundle
pub fn bundle_dir(root: &Path, name: &str) -> PathBuf {
    root.join(name)
}

/// Directory holding one cached bundle version
pub fn entry_dir(root: &Path, name: &str, version: &str) -> PathBuf {
    bundle_dir(root, name).join(version)
}

/// Whether `component` names exactly one directory below its parent.
///
/// Rejects empty strings, `.`/`..`, and anything containing a path separator,
/// so a manifest value can never address a directory outside the root.
pub fn is_safe_component(component: &str) -> bool {
    !component.is_empty()
        && component != "."
        && component != ".."
        && !component.contains(['/', '\\', '\0'])
}

/// Whether a directory entry is hidden (and therefore never staged)
pub fn is_hidden(file_name: &str) -> bool {
    file_name.starts_with('.')
}
