//! Release archive extraction errors

use std::path::Path;

use super::InstallerError;

/// Creates an extraction failed error
pub fn extract_failed(archive: &Path, reason: impl ToString) -> InstallerError {
    InstallerError::ExtractionFailed {
        archive: archive.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a path traversal error for an archive entry
pub fn unsafe_path(entry: impl AsRef<Path>) -> InstallerError {
    InstallerError::UnsafeArchivePath {
        entry: entry.as_ref().display().to_string(),
    }
}

/// Creates the error for an archive without the expected top-level directory
pub fn layout_invalid(path: &Path) -> InstallerError {
    InstallerError::ArchiveLayoutInvalid {
        path: path.display().to_string(),
    }
}
