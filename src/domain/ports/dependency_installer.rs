//! Dependency Installer Port
//!
//! Resolving a manifest into installed packages is delegated entirely; the
//! core only asks where the manifest lives and where packages should land.

use std::path::{Path, PathBuf};

use crate::error::PackerResult;

/// Installer capability consumed by the build step
pub trait DependencyInstaller: Send + Sync {
    /// Installer name (for logging)
    fn name(&self) -> &str;

    /// Manifest file name looked up at the app directory root
    fn manifest_name(&self) -> &str;

    /// Lockfile expected next to the manifest, if the installer uses one
    fn lockfile_name(&self) -> Option<&str> {
        None
    }

    /// Vendor location relative to the app directory
    fn vendor_subdir(&self) -> &Path;

    /// Install the dependencies declared in `app_dir` into `vendor_dir`
    ///
    /// Runs with an environment isolated from the host's own
    /// dependency-manager state.
    fn install(&self, app_dir: &Path, vendor_dir: &Path) -> PackerResult<()>;

    /// Manifest path inside `app_dir`
    fn manifest_path(&self, app_dir: &Path) -> PathBuf {
        app_dir.join(self.manifest_name())
    }

    /// Vendor path inside `app_dir`
    fn vendor_path(&self, app_dir: &Path) -> PathBuf {
        app_dir.join(self.vendor_subdir())
    }
}
