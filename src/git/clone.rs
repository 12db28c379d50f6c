//! Repository cloning
//!
//! Both clones write straight into `target`, which must be absent or an
//! empty directory.

use std::path::Path;

use git2::{FetchOptions, RemoteCallbacks, Repository, build::RepoBuilder};

use super::auth::setup_auth_callbacks;
use super::error::interpret_git_error;
use super::url::{is_local, normalize_clone_url};
use crate::error::{self, Result};
use crate::progress::Spinner;

fn fetch_options<'a>(url: &str, spinner: &'a Spinner) -> FetchOptions<'a> {
    let mut callbacks = RemoteCallbacks::new();
    if !is_local(url) {
        setup_auth_callbacks(&mut callbacks);
    }
    callbacks.transfer_progress(move |stats| {
        spinner.set_message(format!(
            "received {}/{} objects",
            stats.received_objects(),
            stats.total_objects()
        ));
        true
    });

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);
    fetch_options
}

fn run_clone(builder: &mut RepoBuilder<'_>, url: &str, target: &Path) -> Result<Repository> {
    builder
        .clone(normalize_clone_url(url).as_ref(), target)
        .map_err(|e| error::git::clone_failed(url, interpret_git_error(&e)))
}

/// Clone the full history of the default branch into `target`
pub fn clone_full(url: &str, target: &Path, spinner: &Spinner) -> Result<Repository> {
    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options(url, spinner));
    run_clone(&mut builder, url, target)
}

/// Clone only `refs/heads/<branch>` into `target`, leaving HEAD on that branch
pub fn clone_branch(
    url: &str,
    target: &Path,
    branch: &str,
    spinner: &Spinner,
) -> Result<Repository> {
    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options(url, spinner));
    builder.branch(branch);
    builder.remote_create(move |repo, name, url| {
        let refspec = format!("+refs/heads/{branch}:refs/remotes/{name}/{branch}");
        repo.remote_with_fetch(name, url, &refspec)
    });
    run_clone(&mut builder, url, target)
}
