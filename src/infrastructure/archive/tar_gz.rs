//! Builtin tar.gz writer
//!
//! Walks the source tree in file-name order (so archives of the same tree
//! list entries identically) and streams it through gzip. Symlinks are
//! stored as links, not followed.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use ignore::WalkBuilder;

use crate::domain::ports::ArchiveWriter;
use crate::error::{PackerError, PackerResult};

use super::is_excluded;

/// In-process archive writer using the `tar` and `flate2` crates
#[derive(Debug, Clone, Copy, Default)]
pub struct TarGzWriter {
    level: Option<u32>,
}

impl TarGzWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific gzip level (0-9)
    pub fn with_level(level: u32) -> Self {
        Self {
            level: Some(level.min(9)),
        }
    }

    fn compression(&self) -> Compression {
        self.level.map(Compression::new).unwrap_or_default()
    }
}

fn archive_error(path: &Path, err: impl ToString) -> PackerError {
    PackerError::Archive {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

impl ArchiveWriter for TarGzWriter {
    fn name(&self) -> &'static str {
        "builtin"
    }

    fn create(
        &self,
        archive_path: &Path,
        source_dir: &Path,
        exclude: &[String],
    ) -> PackerResult<()> {
        let file = File::create(archive_path)?;
        let encoder = GzEncoder::new(BufWriter::new(file), self.compression());
        let mut builder = tar::Builder::new(encoder);
        builder.follow_symlinks(false);

        let root: PathBuf = source_dir.to_path_buf();
        let filter_root = root.clone();
        let filter_exclude = exclude.to_vec();
        let walker = WalkBuilder::new(&root)
            .standard_filters(false)
            .hidden(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| match entry.path().strip_prefix(&filter_root) {
                Ok(rel) => !is_excluded(rel, &filter_exclude),
                Err(_) => true,
            })
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| archive_error(archive_path, e))?;
            let path = entry.path();
            let rel = path
                .strip_prefix(&root)
                .map_err(|e| archive_error(archive_path, e))?;
            if rel.as_os_str().is_empty() {
                continue;
            }

            builder
                .append_path_with_name(path, rel)
                .map_err(|e| archive_error(archive_path, format!("{}: {}", rel.display(), e)))?;
        }

        let encoder = builder
            .into_inner()
            .map_err(|e| archive_error(archive_path, e))?;
        let mut writer = encoder
            .finish()
            .map_err(|e| archive_error(archive_path, e))?;
        writer.flush()?;
        let file = writer
            .into_inner()
            .map_err(|e| archive_error(archive_path, e.error()))?;
        file.sync_all()?;

        Ok(())
    }
}
