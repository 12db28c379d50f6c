//! Git operation errors

use super::InstallerError;

/// Creates a clone failed error
pub fn clone_failed(url: impl Into<String>, reason: impl Into<String>) -> InstallerError {
    InstallerError::GitCloneFailed {
        url: url.into(),
        reason: reason.into(),
    }
}

/// Creates a checkout failed error
pub fn checkout_failed(sha: impl Into<String>, reason: impl Into<String>) -> InstallerError {
    InstallerError::GitCheckoutFailed {
        sha: sha.into(),
        reason: reason.into(),
    }
}
