//! Artifact entity

use std::path::{Path, PathBuf};

use crate::domain::value_objects::ContentHash;

/// The compressed archive produced by a packaging run
///
/// Lives outside the workspace and survives `clean`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    path: PathBuf,
    size: u64,
    checksum: ContentHash,
}

impl Artifact {
    /// Describe an archive that already exists on disk
    pub fn from_path(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let size = std::fs::metadata(&path)?.len();
        let checksum = ContentHash::from_file(&path)?;
        Ok(Self {
            path,
            size,
            checksum,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn checksum(&self) -> &ContentHash {
        &self.checksum
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}
