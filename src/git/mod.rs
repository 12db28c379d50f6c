//! Git operations for source installs
//!
//! This module handles:
//! - Cloning the full repository or a single branch
//! - Checking out an exact commit on a detached HEAD
//! - Reading back HEAD for verification and logging
//!
//! Authentication is delegated entirely to git's native system:
//! - SSH keys from ~/.ssh/ and the SSH agent
//! - Git credential helpers
//!
//! None of these operations has a timeout; a stalled transport blocks the
//! caller until the remote gives up.

mod auth;
mod checkout;
mod clone;
mod error;
mod url;

pub use checkout::{checkout_commit, current_branch, head_commit};
pub use clone::{clone_branch, clone_full};
