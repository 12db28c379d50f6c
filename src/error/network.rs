//! Release download errors

use super::InstallerError;

/// Creates a request failed error (connect, timeout, body read)
pub fn request_failed(url: impl Into<String>, reason: impl Into<String>) -> InstallerError {
    InstallerError::DownloadFailed {
        url: url.into(),
        reason: reason.into(),
    }
}

/// Creates a non-success HTTP status error
pub fn bad_status(url: impl Into<String>, status: u16) -> InstallerError {
    InstallerError::HttpStatus {
        url: url.into(),
        status,
    }
}
