//! Dependency Builder
//!
//! Vendors a fetched source's declared dependencies into its own tree.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::ports::{DependencyInstaller, PackEvent, PackEventSink};
use crate::error::PackerResult;

/// What `build` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// No manifest; the app directory is unchanged
    Skipped,
    /// Dependencies installed into `vendor_dir`
    Installed { vendor_dir: PathBuf },
}

pub struct DependencyBuilder {
    installer: Arc<dyn DependencyInstaller>,
    events: Arc<dyn PackEventSink>,
}

impl DependencyBuilder {
    pub fn new(installer: Arc<dyn DependencyInstaller>, events: Arc<dyn PackEventSink>) -> Self {
        Self { installer, events }
    }

    /// Install dependencies declared by the manifest in `app_dir`
    ///
    /// A missing manifest is a silent no-op. A missing lockfile is reported
    /// but does not stop the install.
    pub fn build(&self, app_dir: &Path) -> PackerResult<BuildOutcome> {
        let manifest = self.installer.manifest_path(app_dir);
        if !manifest.is_file() {
            tracing::debug!(manifest = %manifest.display(), "no manifest, nothing to install");
            self.events.emit(PackEvent::BuildSkipped { manifest });
            return Ok(BuildOutcome::Skipped);
        }

        if let Some(lockfile) = self.installer.lockfile_name().map(|l| app_dir.join(l)) {
            if !lockfile.is_file() {
                self.events.emit(PackEvent::LockfileMissing {
                    manifest: manifest.clone(),
                    lockfile,
                });
            }
        }

        let vendor_dir = self.installer.vendor_path(app_dir);
        self.installer.install(app_dir, &vendor_dir)?;

        self.events.emit(PackEvent::DependenciesInstalled {
            installer: self.installer.name().to_string(),
            vendor_dir: vendor_dir.clone(),
        });
        Ok(BuildOutcome::Installed { vendor_dir })
    }
}
