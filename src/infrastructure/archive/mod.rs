//! Archive Writer Implementations
//!
//! - `TarGzWriter`: in-process tar + gzip
//! - `TarCommandWriter`: external `tar -czf`

mod tar_command;
mod tar_gz;

pub use tar_command::TarCommandWriter;
pub use tar_gz::TarGzWriter;

use std::path::Path;

/// Whether `relative` equals or lies beneath one of `exclude`
///
/// Matching is per path component, so `.git` excludes `.git/config` but
/// not `.gitignore`.
pub(crate) fn is_excluded(relative: &Path, exclude: &[String]) -> bool {
    exclude
        .iter()
        .map(|pattern| pattern.trim_matches('/'))
        .filter(|pattern| !pattern.is_empty())
        .any(|pattern| relative.starts_with(pattern))
}
