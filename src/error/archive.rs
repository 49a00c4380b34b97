//! Archive expansion errors

use std::path::Path;

use super::SyncError;

/// Creates an archive expansion error
pub fn expand_failed(path: impl AsRef<Path>, reason: impl ToString) -> SyncError {
    SyncError::ArchiveFailed {
        path: path.as_ref().display().to_string(),
        reason: reason.to_string(),
    }
}
