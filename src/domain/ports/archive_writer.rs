//! Archive Writer Port

use std::path::Path;

use crate::error::PackerResult;

/// Archive capability: tar + gzip a directory
pub trait ArchiveWriter: Send + Sync {
    /// Backend name (for logging)
    fn name(&self) -> &'static str;

    /// Write `source_dir` to `archive_path`
    ///
    /// Entry paths are relative to `source_dir`. Any entry whose relative
    /// path equals one of `exclude`, or lies beneath one, is left out.
    fn create(&self, archive_path: &Path, source_dir: &Path, exclude: &[String])
        -> PackerResult<()>;
}
