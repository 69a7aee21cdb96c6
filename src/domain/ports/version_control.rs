//! Version Control Port
//!
//! Clone, checkout and revision lookup. The client itself is external;
//! implementations only translate these calls into commands.

use std::path::Path;

use crate::error::PackerResult;

/// Version-control capability consumed by fetch and version resolution
pub trait VersionControl: Send + Sync {
    /// Client name (for logging)
    fn name(&self) -> &'static str;

    /// Name of the metadata directory marking a checkout (e.g. `.git`)
    fn metadata_dir(&self) -> &'static str;

    /// Clone `locator` directly into the existing, empty `dest`
    fn clone_repo(&self, locator: &str, dest: &Path) -> PackerResult<()>;

    /// Check out `revision` inside the checkout at `repo`
    fn checkout(&self, repo: &Path, revision: &str) -> PackerResult<()>;

    /// Short, deterministic identifier of `revision` (`None` = current tip)
    fn short_revision(&self, repo: &Path, revision: Option<&str>) -> PackerResult<String>;

    /// Whether `dir` already holds a checkout
    fn is_checkout(&self, dir: &Path) -> bool {
        dir.join(self.metadata_dir()).exists()
    }
}
