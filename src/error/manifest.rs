//! Manifest parsing errors

use super::SyncError;

/// Creates an invalid JSON error
pub fn invalid_json(bytes: usize, reason: impl ToString) -> SyncError {
    SyncError::InvalidManifest {
        bytes,
        reason: reason.to_string(),
    }
}

/// Creates a malformed descriptor error
pub fn malformed_descriptor(index: usize, reason: impl ToString) -> SyncError {
    SyncError::MalformedDescriptor {
        index,
        reason: reason.to_string(),
    }
}
