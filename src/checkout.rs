//! Source checkout acquisition
//!
//! Clones `CloneURL` straight into `Root/Source` and checks out either the
//! configured commit or branch. The commit always wins; the branch is only
//! consulted when no commit is configured.

use std::path::PathBuf;

use crate::acquire::Stage;
use crate::common::fs;
use crate::config::InstallConfig;
use crate::error::{self, Result};
use crate::git;
use crate::logging::Reporter;

/// Which revision a source install checks out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    Commit(String),
    Branch(String),
}

impl SourceRef {
    /// Pick the revision from the configuration.
    ///
    /// Values are trimmed first; whitespace-only counts as unset.
    pub fn from_config(config: &InstallConfig) -> Result<Self> {
        let commit = config.source_commit.trim();
        let branch = config.source_branch.trim();

        if !commit.is_empty() {
            Ok(Self::Commit(commit.to_string()))
        } else if !branch.is_empty() {
            Ok(Self::Branch(branch.to_string()))
        } else {
            Err(error::config::source_ref_missing(
                &config.source_commit,
                &config.source_branch,
            ))
        }
    }
}

/// Clone the repository into `Root/Source` and check out the configured
/// commit or branch.
///
/// A failure after the clone has started leaves the partial clone in place.
pub fn checkout_source(config: &InstallConfig, reporter: &Reporter) -> Result<PathBuf> {
    reporter.status("Downloading DefectDojo source as a branch or commit from the repo directly");

    reporter.trace("Determining if a commit or branch will be checked out of the repo");
    let source_ref = SourceRef::from_config(config)?;

    let target = config.source_path();
    fs::ensure_target_free(&target)?;
    reporter.trace("Creating source directory if it doesn't exist already");
    fs::create_dir_all(&target)?;

    let url = config.clone_url.as_str();
    match &source_ref {
        SourceRef::Commit(sha) => {
            reporter.status(&format!("DefectDojo will be installed from commit {sha}"));

            Stage::Cloning.enter(reporter);
            reporter.trace(&format!("Initial clone of {url}"));
            let repo = {
                let spinner = reporter.spinner(format!("Cloning {url}"));
                git::clone_full(url, &target, &spinner)?
            };

            Stage::CheckingOut.enter(reporter);
            reporter.trace("Setting up the working tree to checkout the commit");
            let oid = git::checkout_commit(&repo, sha)?;
            reporter.trace(&format!("HEAD detached at {oid}"));
        }
        SourceRef::Branch(branch) => {
            reporter.status(&format!("DefectDojo will be installed from branch {branch}"));

            Stage::Cloning.enter(reporter);
            reporter.trace(&format!("Checking out branch {branch} of {url}"));
            let repo = {
                let spinner = reporter.spinner(format!("Cloning {branch} from {url}"));
                git::clone_branch(url, &target, branch, &spinner)?
            };

            Stage::CheckingOut.enter(reporter);
            let head = git::head_commit(&repo)?;
            let on = git::current_branch(&repo)?.unwrap_or_else(|| "detached HEAD".to_string());
            reporter.trace(&format!("HEAD is on {on} at {head}"));
        }
    }

    Stage::Done.enter(reporter);
    reporter.status("Successfully checked out the configured DefectDojo source");
    Ok(target)
}
