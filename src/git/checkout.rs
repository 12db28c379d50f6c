//! Commit checkout and HEAD inspection

use git2::{Commit, Oid, Repository, build::CheckoutBuilder};

use crate::error::{self, Result};

const FULL_SHA_LEN: usize = 40;
const MIN_SHA_LEN: usize = 4;

/// Resolve a full or abbreviated commit id.
///
/// Anything that is not a hex object id is refused, so a branch or tag name
/// configured as a commit fails instead of silently resolving.
fn find_commit<'r>(repo: &'r Repository, sha: &str) -> Result<Commit<'r>> {
    let checkout_err = |reason: String| error::git::checkout_failed(sha, reason);

    if sha.len() < MIN_SHA_LEN
        || sha.len() > FULL_SHA_LEN
        || !sha.chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(checkout_err("not a commit hash".to_string()));
    }

    if sha.len() == FULL_SHA_LEN {
        let oid = Oid::from_str(sha).map_err(|e| checkout_err(e.message().to_string()))?;
        return repo
            .find_commit(oid)
            .map_err(|e| checkout_err(e.message().to_string()));
    }

    repo.revparse_single(sha)
        .and_then(|obj| obj.peel_to_commit())
        .map_err(|e| checkout_err(e.message().to_string()))
}

/// Detach HEAD at `sha` and force the working tree to match it.
///
/// Returns the full id of the checked out commit.
pub fn checkout_commit(repo: &Repository, sha: &str) -> Result<Oid> {
    let commit = find_commit(repo, sha)?;

    repo.set_head_detached(commit.id())
        .map_err(|e| error::git::checkout_failed(sha, e.message()))?;

    let mut checkout_builder = CheckoutBuilder::new();
    checkout_builder.force();
    repo.checkout_head(Some(&mut checkout_builder))
        .map_err(|e| error::git::checkout_failed(sha, e.message()))?;

    Ok(commit.id())
}

/// Full id of the commit HEAD points at
pub fn head_commit(repo: &Repository) -> Result<String> {
    let commit = repo.head()?.peel_to_commit()?;
    Ok(commit.id().to_string())
}

/// Branch HEAD is on, or `None` when detached
pub fn current_branch(repo: &Repository) -> Result<Option<String>> {
    let head = repo.head()?;
    if head.is_branch() {
        Ok(head.shorthand().map(str::to_string))
    } else {
        Ok(None)
    }
}
