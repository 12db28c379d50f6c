//! Common test utilities for installer integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use git2::{Oid, Repository, Signature};
use tempfile::TempDir;

/// A scratch working directory holding dojoConfig.yml, logs and the install root
pub struct TestWorkspace {
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Install root used by the configs written below
    pub fn root(&self) -> PathBuf {
        self.path.join("opt").join("dojo")
    }

    /// Write dojoConfig.yml with the given `Install:` body lines
    pub fn write_config(&self, install: &str) {
        let mut yaml = format!("Install:\n  Root: {}\n", self.root().display());
        for line in install.lines().filter(|l| !l.trim().is_empty()) {
            yaml.push_str("  ");
            yaml.push_str(line.trim());
            yaml.push('\n');
        }
        self.write_file("dojoConfig.yml", &yaml);
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Contents of the single install log written to `logs/`
    pub fn read_log(&self) -> String {
        let mut logs: Vec<PathBuf> = std::fs::read_dir(self.path.join("logs"))
            .expect("Failed to read log directory")
            .map(|e| e.expect("Failed to read log entry").path())
            .collect();
        assert_eq!(logs.len(), 1, "expected exactly one log file");
        std::fs::read_to_string(logs.remove(0)).expect("Failed to read log file")
    }

    /// Installer command running inside the workspace
    #[allow(deprecated)]
    pub fn dojo_cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("dojo-installer").expect("Failed to find binary");
        cmd.current_dir(&self.path)
            .env_remove("DOJO_CONFIG")
            .env_remove("DOJO_LOG");
        cmd
    }
}

/// A local git repository to clone from over `file://`
pub struct GitFixture {
    pub temp: TempDir,
    pub repo: Repository,
}

impl GitFixture {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let repo = Repository::init(temp.path()).expect("Failed to init git repository");
        Self { temp, repo }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn url(&self) -> String {
        format!("file://{}", self.path().display())
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

    /// Create branch `name` at `oid`
    pub fn branch(&self, name: &str, oid: Oid) {
        let commit = self.repo.find_commit(oid).expect("Failed to find commit");
        self.repo
            .branch(name, &commit, false)
            .expect("Failed to create branch");
    }
}
