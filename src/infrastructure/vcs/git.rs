//! Git Version Control
//!
//! Drives the `git` command line client through a `ProcessRunner`.

use std::path::Path;
use std::sync::Arc;

use crate::domain::ports::{CommandSpec, ProcessRunner, VersionControl};
use crate::error::PackerResult;

/// Git client invoked as an external program
pub struct GitCli {
    program: String,
    runner: Arc<dyn ProcessRunner>,
}

impl GitCli {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self::with_program("git", runner)
    }

    /// Use a specific git binary
    pub fn with_program(program: impl Into<String>, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    fn git(&self) -> CommandSpec {
        CommandSpec::new(&self.program)
    }
}

impl VersionControl for GitCli {
    fn name(&self) -> &'static str {
        "git"
    }

    fn metadata_dir(&self) -> &'static str {
        ".git"
    }

    fn clone_repo(&self, locator: &str, dest: &Path) -> PackerResult<()> {
        let spec = self
            .git()
            .args(["clone", "--quiet", "--", locator])
            .path_arg(dest);
        self.runner.run_checked(&spec)?;
        Ok(())
    }

    fn checkout(&self, repo: &Path, revision: &str) -> PackerResult<()> {
        let spec = self
            .git()
            .args(["checkout", "--quiet", revision])
            .current_dir(repo);
        reject_option_like(&spec, revision)?;
        self.runner.run_checked(&spec)?;
        Ok(())
    }

    fn short_revision(&self, repo: &Path, revision: Option<&str>) -> PackerResult<String> {
        // Peel tags so an annotated tag resolves to the commit it names
        let target = format!("{}^{{commit}}", revision.unwrap_or("HEAD"));
        let spec = self
            .git()
            .args(["rev-parse", "--verify", "--short", target.as_str()])
            .current_dir(repo);
        reject_option_like(&spec, &target)?;
        let output = self.runner.run_checked(&spec)?;

        let short = output.stdout.trim().to_string();
        if short.is_empty() || !short.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(spec.failure(output.status, format!("unexpected revision '{}'", short)));
        }
        Ok(short)
    }
}

/// A revision starting with `-` would be parsed by git as an option
fn reject_option_like(spec: &CommandSpec, revision: &str) -> PackerResult<()> {
    if revision.starts_with('-') {
        return Err(spec.failure(
            None,
            format!("revision '{}' must not start with '-'", revision),
        ));
    }
    Ok(())
}

impl std::fmt::Debug for GitCli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitCli")
            .field("program", &self.program)
            .finish()
    }
}
