//! File system errors

use std::path::Path;

use super::SyncError;

/// Creates a directory creation error
pub fn create_dir_failed(path: impl AsRef<Path>, reason: impl ToString) -> SyncError {
    SyncError::CreateDirFailed {
        path: path.as_ref().display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a file write error
pub fn write_failed(path: impl AsRef<Path>, reason: impl ToString) -> SyncError {
    SyncError::FileWriteFailed {
        path: path.as_ref().display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a removal error
pub fn remove_failed(path: impl AsRef<Path>, reason: impl ToString) -> SyncError {
    SyncError::RemoveFailed {
        path: path.as_ref().display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a copy error
pub fn copy_failed(
    from: impl AsRef<Path>,
    to: impl AsRef<Path>,
    reason: impl ToString,
) -> SyncError {
    SyncError::CopyFailed {
        from: from.as_ref().display().to_string(),
        to: to.as_ref().display().to_string(),
        reason: reason.to_string(),
    }
}
