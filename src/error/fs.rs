//! File system errors

use std::path::Path;

use super::InstallerError;

/// Creates a file create failed error
pub fn create_failed(path: &Path, reason: impl ToString) -> InstallerError {
    InstallerError::FileCreateFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: &Path, reason: impl ToString) -> InstallerError {
    InstallerError::FileWriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a file open failed error
pub fn open_failed(path: &Path, reason: impl ToString) -> InstallerError {
    InstallerError::FileOpenFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a directory create failed error
pub fn dir_create_failed(path: &Path, reason: impl ToString) -> InstallerError {
    InstallerError::DirectoryCreateFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a rename failed error
pub fn rename_failed(
    from: impl AsRef<Path>,
    to: impl AsRef<Path>,
    reason: impl ToString,
) -> InstallerError {
    InstallerError::RenameFailed {
        from: from.as_ref().display().to_string(),
        to: to.as_ref().display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a target exists error
pub fn target_exists(path: &Path) -> InstallerError {
    InstallerError::TargetExists {
        path: path.display().to_string(),
    }
}
