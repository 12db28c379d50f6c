//! Configuration errors

use super::InstallerError;

/// Creates a config not found error
pub fn not_found(path: impl Into<String>) -> InstallerError {
    InstallerError::ConfigNotFound { path: path.into() }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> InstallerError {
    InstallerError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> InstallerError {
    InstallerError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates the error for source mode without a commit or branch
pub fn source_ref_missing(commit: impl Into<String>, branch: impl Into<String>) -> InstallerError {
    InstallerError::SourceRefMissing {
        commit: commit.into(),
        branch: branch.into(),
    }
}
