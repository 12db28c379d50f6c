//! Test fixtures shared by the unit tests.
//!
//! - [`SourceRepo`]: a throwaway git repository to clone from over `file://`
//! - [`release_tarball`]: a gzipped release archive with a top-level directory
//! - [`tarball_with_raw_path`] / [`tarball_with_symlink`] / [`symlink_tarball`]:
//!   archives with unsafe paths or links the `tar` builder would refuse to produce

#![allow(clippy::expect_used)]

use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use git2::{Oid, Repository, Signature};
use tempfile::TempDir;

/// `file://` URL for a local repository path
pub fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}

/// Non-bare repository in a temp directory
pub struct SourceRepo {
    repo: Repository,
    _temp: TempDir,
}

impl SourceRepo {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let repo = Repository::init(temp.path()).expect("Failed to init git repository");
        Self { repo, _temp: temp }
    }

    pub fn path(&self) -> &Path {
        self.repo.workdir().expect("Repository has no working directory")
    }

    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    /// Write `file` and commit it on top of HEAD
    pub fn commit(&self, file: &str, content: &str, message: &str) -> Oid {
        std::fs::write(self.path().join(file), content).expect("Failed to write file");

        let mut index = self.repo.index().expect("Failed to open index");
        index
            .add_path(Path::new(file))
            .expect("Failed to add file to index");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let sig = Signature::now("Test", "test@test.com").expect("Failed to create signature");
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to commit")
    }

    /// Create branch `name` pointing at `oid`
    pub fn branch_at(&self, name: &str, oid: Oid) {
        let commit = self.repo.find_commit(oid).expect("Failed to find commit");
        self.repo
            .branch(name, &commit, false)
            .expect("Failed to create branch");
    }
}

fn finish(builder: tar::Builder<GzEncoder<Vec<u8>>>) -> Vec<u8> {
    builder
        .into_inner()
        .expect("Failed to finish tar stream")
        .finish()
        .expect("Failed to finish gzip stream")
}

/// Gzipped tarball with every file under `top/`
pub fn release_tarball(top: &str, files: &[(&str, &str)]) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));

    let mut dir = tar::Header::new_gnu();
    dir.set_entry_type(tar::EntryType::Directory);
    dir.set_mode(0o755);
    dir.set_size(0);
    builder
        .append_data(&mut dir, format!("{top}/"), std::io::empty())
        .expect("Failed to append directory");

    for (name, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_mode(0o644);
        header.set_size(content.len() as u64);
        builder
            .append_data(&mut header, format!("{top}/{name}"), content.as_bytes())
            .expect("Failed to append file");
    }

    finish(builder)
}

/// Gzipped tarball holding one regular file stored under `path` verbatim
pub fn tarball_with_raw_path(path: &str, content: &[u8]) -> Vec<u8> {
    let mut header = tar::Header::new_gnu();
    header.as_old_mut().name[..path.len()].copy_from_slice(path.as_bytes());
    header.set_entry_type(tar::EntryType::Regular);
    header.set_mode(0o644);
    header.set_size(content.len() as u64);
    header.set_cksum();

    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    builder.append(&header, content).expect("Failed to append entry");
    finish(builder)
}

/// Gzipped tarball holding a symlink at `path` pointing to `target`
pub fn tarball_with_symlink(path: &str, target: &str) -> Vec<u8> {
    symlink_tarball(&[], &[(path, target)])
}

/// Gzipped tarball with `dirs` first, then `(path, target)` symlinks in order
pub fn symlink_tarball(dirs: &[&str], links: &[(&str, &str)]) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));

    for dir in dirs {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Directory);
        header.set_mode(0o755);
        header.set_size(0);
        builder
            .append_data(&mut header, dir, std::io::empty())
            .expect("Failed to append directory");
    }

    for (path, target) in links {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Symlink);
        header.set_mode(0o777);
        header.set_size(0);
        header.set_path(path).expect("Failed to set path");
        header.set_link_name(target).expect("Failed to set link name");
        header.set_cksum();
        builder
            .append(&header, std::io::empty())
            .expect("Failed to append symlink");
    }

    finish(builder)
}
