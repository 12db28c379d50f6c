//! Error types and handling for the installer
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration errors
//! - [`network`]: Release download errors
//! - [`fs`]: File system errors
//! - [`archive`]: Release archive extraction errors
//! - [`git`]: Git operation errors

pub mod archive;
pub mod config;
pub mod fs;
pub mod git;
pub mod network;

use miette::Diagnostic;
use thiserror::Error;

/// Broad failure category of an [`InstallerError`].
///
/// Callers branch on this instead of matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Network,
    Filesystem,
    Extraction,
    SourceControl,
}

/// Main error type for installer operations
#[derive(Error, Diagnostic, Debug)]
pub enum InstallerError {
    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(dojo::config::not_found),
        help("Create dojoConfig.yml next to the installer or pass --config <file>")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file {path}: {reason}")]
    #[diagnostic(code(dojo::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(dojo::config::invalid))]
    ConfigInvalid { message: String },

    #[error(
        "Both source commit and branch have empty or nonsensical values configured \
         (commit: '{commit}', branch: '{branch}')"
    )]
    #[diagnostic(
        code(dojo::config::source_ref_missing),
        help("Set Install.SourceCommit or Install.SourceBranch when SourceInstall is true")
    )]
    SourceRefMissing { commit: String, branch: String },

    // Network errors
    #[error("Failed to download {url}: {reason}")]
    #[diagnostic(
        code(dojo::network::request_failed),
        help("Check network access and that the release URL is reachable")
    )]
    DownloadFailed { url: String, reason: String },

    #[error("Download of {url} returned HTTP {status}")]
    #[diagnostic(
        code(dojo::network::bad_status),
        help("Check that Install.Version names an existing release tag")
    )]
    HttpStatus { url: String, status: u16 },

    // File system errors
    #[error("Failed to create file {path}: {reason}")]
    #[diagnostic(code(dojo::fs::create_failed))]
    FileCreateFailed { path: String, reason: String },

    #[error("Failed to write file {path}: {reason}")]
    #[diagnostic(code(dojo::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to open file {path}: {reason}")]
    #[diagnostic(code(dojo::fs::open_failed))]
    FileOpenFailed { path: String, reason: String },

    #[error("Failed to create directory {path}: {reason}")]
    #[diagnostic(code(dojo::fs::dir_create_failed))]
    DirectoryCreateFailed { path: String, reason: String },

    #[error("Failed to rename {from} to {to}: {reason}")]
    #[diagnostic(code(dojo::fs::rename_failed))]
    RenameFailed {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Source directory already exists and is not empty: {path}")]
    #[diagnostic(
        code(dojo::fs::target_exists),
        help("Remove the directory or choose another Install.Source before retrying")
    )]
    TargetExists { path: String },

    // Extraction errors
    #[error("Failed to extract {archive}: {reason}")]
    #[diagnostic(code(dojo::archive::extract_failed))]
    ExtractionFailed { archive: String, reason: String },

    #[error("Archive entry escapes the extraction root: {entry}")]
    #[diagnostic(
        code(dojo::archive::unsafe_path),
        help("The release archive is corrupt or malicious; do not install from it")
    )]
    UnsafeArchivePath { entry: String },

    #[error("Archive did not contain the expected directory {path}")]
    #[diagnostic(
        code(dojo::archive::missing_top_level),
        help("Check Install.ProjectName against the archive's top-level directory")
    )]
    ArchiveLayoutInvalid { path: String },

    // Git errors
    #[error("Failed to clone repository {url}: {reason}")]
    #[diagnostic(
        code(dojo::git::clone_failed),
        help("Check that the URL is correct and you have access to the repository")
    )]
    GitCloneFailed { url: String, reason: String },

    #[error("Failed to checkout commit '{sha}': {reason}")]
    #[diagnostic(code(dojo::git::checkout_failed))]
    GitCheckoutFailed { sha: String, reason: String },

    #[error("Git operation failed: {message}")]
    #[diagnostic(code(dojo::git::operation_failed))]
    GitOperationFailed { message: String },
}

impl InstallerError {
    /// Category used by callers and tests to reason about failures.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigNotFound { .. }
            | Self::ConfigParseFailed { .. }
            | Self::ConfigInvalid { .. }
            | Self::SourceRefMissing { .. } => ErrorKind::Configuration,
            Self::DownloadFailed { .. } | Self::HttpStatus { .. } => ErrorKind::Network,
            Self::FileCreateFailed { .. }
            | Self::FileWriteFailed { .. }
            | Self::FileOpenFailed { .. }
            | Self::DirectoryCreateFailed { .. }
            | Self::RenameFailed { .. }
            | Self::TargetExists { .. } => ErrorKind::Filesystem,
            Self::ExtractionFailed { .. }
            | Self::UnsafeArchivePath { .. }
            | Self::ArchiveLayoutInvalid { .. } => ErrorKind::Extraction,
            Self::GitCloneFailed { .. }
            | Self::GitCheckoutFailed { .. }
            | Self::GitOperationFailed { .. } => ErrorKind::SourceControl,
        }
    }
}

impl From<serde_yaml::Error> for InstallerError {
    fn from(err: serde_yaml::Error) -> Self {
        InstallerError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<git2::Error> for InstallerError {
    fn from(err: git2::Error) -> Self {
        InstallerError::GitOperationFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, InstallerError>;
