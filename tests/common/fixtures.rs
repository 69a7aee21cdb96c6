//! Git repository fixtures.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Whether a usable `git` is on PATH
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Whether a usable `tar` is on PATH
pub fn tar_available() -> bool {
    Command::new("tar")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Return early from a test when git is missing.
#[macro_export]
macro_rules! require_git {
    () => {
        if !$crate::common::git_available() {
            eprintln!("skipping: git not available");
            return;
        }
    };
}

/// A repository named `widget` inside its own temp directory
pub struct GitRepo {
    _dir: TempDir,
    path: PathBuf,
}

impl GitRepo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("widget");
        std::fs::create_dir(&path).expect("Failed to create repo dir");

        let repo = Self { _dir: dir, path };
        repo.git(&["init", "-q"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        repo
    }

    /// Repository with a single commit holding `files`
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let repo = Self::new();
        for (name, content) in files {
            repo.write(name, content);
        }
        repo.commit("initial");
        repo
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Locator string for `PackageSource`
    pub fn locator(&self) -> String {
        self.path.display().to_string()
    }

    pub fn write(&self, relative: &str, content: &str) {
        let full = self.path.join(relative);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(full, content).expect("Failed to write file");
    }

    /// Commit everything and return the full commit id
    pub fn commit(&self, message: &str) -> String {
        self.git(&["add", "-A"]);
        self.git(&[
            "-c",
            "user.name=Packer Tests",
            "-c",
            "user.email=tests@example.com",
            "-c",
            "commit.gpgsign=false",
            "commit",
            "-q",
            "-m",
            message,
        ]);
        self.git(&["rev-parse", "HEAD"])
    }

    pub fn tag(&self, name: &str) {
        self.git(&["tag", name]);
    }

    /// Abbreviated commit id, as git would print it
    pub fn short(&self, rev: &str) -> String {
        self.git(&["rev-parse", "--short", &format!("{rev}^{{commit}}")])
    }

    /// Run git in the repository and return trimmed stdout
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.path)
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}
