//! Network fetch errors

use super::SyncError;

/// Creates a request failed error
pub fn request_failed(url: impl Into<String>, reason: impl ToString) -> SyncError {
    SyncError::Transport {
        url: url.into(),
        reason: reason.to_string(),
    }
}

/// Creates an HTTP status error
pub fn http_status(url: impl Into<String>, status: u16) -> SyncError {
    SyncError::HttpStatus {
        url: url.into(),
        status,
    }
}

/// Creates an empty response error
pub fn empty_response(url: impl Into<String>) -> SyncError {
    SyncError::EmptyResponse { url: url.into() }
}
