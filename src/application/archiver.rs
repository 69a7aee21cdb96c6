//! Archiver
//!
//! Turns the app directory into a compressed archive at the output path.
//! The archive is written to a temporary sibling and renamed into place, so
//! the output path only ever holds a complete archive.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::Artifact;
use crate::domain::ports::{ArchiveWriter, PackEvent, PackEventSink};
use crate::error::{PackerError, PackerResult};

/// Mode of a finished archive; staging files start out owner-only
#[cfg(unix)]
const ARTIFACT_MODE: u32 = 0o644;

pub struct Archiver {
    writer: Arc<dyn ArchiveWriter>,
    exclude: Vec<String>,
    events: Arc<dyn PackEventSink>,
}

impl Archiver {
    pub fn new(writer: Arc<dyn ArchiveWriter>, events: Arc<dyn PackEventSink>) -> Self {
        Self {
            writer,
            exclude: Vec::new(),
            events,
        }
    }

    /// Leave these app-relative paths out of every archive
    pub fn with_exclude<I, S>(mut self, exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(exclude.into_iter().map(Into::into));
        self
    }

    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    /// Archive `app_dir` into `output`, replacing any existing file
    pub fn assemble(&self, app_dir: &Path, output: &Path) -> PackerResult<Artifact> {
        let parent = match output.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let staging = tempfile::Builder::new()
            .prefix(".packer-")
            .suffix(".tar.gz.part")
            .tempfile_in(parent)?;

        tracing::debug!(
            backend = self.writer.name(),
            source = %app_dir.display(),
            output = %output.display(),
            "writing archive"
        );
        self.writer.create(staging.path(), app_dir, &self.exclude)?;
        publish_permissions(staging.path())?;

        staging
            .persist(output)
            .map_err(|e| PackerError::Archive {
                path: output.to_path_buf(),
                message: e.error.to_string(),
            })?;

        let artifact = Artifact::from_path(output)?;
        self.events.emit(PackEvent::Assembled {
            path: artifact.path().to_path_buf(),
            size: artifact.size(),
            checksum: artifact.checksum().to_string(),
        });
        Ok(artifact)
    }
}

#[cfg(unix)]
fn publish_permissions(path: &Path) -> PackerResult<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(ARTIFACT_MODE))?;
    Ok(())
}

#[cfg(not(unix))]
fn publish_permissions(_path: &Path) -> PackerResult<()> {
    Ok(())
}
