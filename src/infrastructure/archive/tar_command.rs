//! External tar writer
//!
//! Delegates to `tar -czf` with the source directory as `-C` root.

use std::path::Path;
use std::sync::Arc;

use crate::domain::ports::{ArchiveWriter, CommandSpec, ProcessRunner};
use crate::error::PackerResult;

/// Archive writer that shells out to `tar`
pub struct TarCommandWriter {
    program: String,
    runner: Arc<dyn ProcessRunner>,
}

impl TarCommandWriter {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            program: "tar".to_string(),
            runner,
        }
    }

    /// The command that `create` would run
    pub fn command(&self, archive_path: &Path, source_dir: &Path, exclude: &[String]) -> CommandSpec {
        let excludes = exclude
            .iter()
            .map(|pattern| pattern.trim_matches('/'))
            .filter(|pattern| !pattern.is_empty())
            .map(|pattern| format!("--exclude=./{}", pattern))
            .collect::<Vec<_>>();

        CommandSpec::new(&self.program)
            .arg("-czf")
            .path_arg(archive_path)
            .args(excludes)
            .arg("-C")
            .path_arg(source_dir)
            .arg(".")
    }
}

impl ArchiveWriter for TarCommandWriter {
    fn name(&self) -> &'static str {
        "tar"
    }

    fn create(
        &self,
        archive_path: &Path,
        source_dir: &Path,
        exclude: &[String],
    ) -> PackerResult<()> {
        self.runner
            .run_checked(&self.command(archive_path, source_dir, exclude))?;
        Ok(())
    }
}
