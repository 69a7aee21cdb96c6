//! Package identity entity
//!
//! Naming data derived from a source: the repository name and the short
//! revision it was packaged at.

use super::PackageSource;

/// Fallback name when a locator has no usable final segment
const FALLBACK_NAME: &str = "package";

/// Name and version used to label an artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIdentity {
    pub name: String,
    pub version: String,
}

impl PackageIdentity {
    pub fn new(source: &PackageSource, version: impl Into<String>) -> Self {
        Self {
            name: derive_name(source.locator()),
            version: version.into(),
        }
    }

    /// Default archive file name: `<name>-<version>.tar.gz`
    pub fn archive_file_name(&self) -> String {
        format!("{}-{}.tar.gz", self.name, self.version)
    }
}

/// Derive a package name from a repository locator
///
/// Takes the last segment after `/`, `\` or `:` (ignoring trailing
/// separators) and strips one extension, so
/// `https://github.com/org/tool.git` and `git@host:org/tool.git` both
/// become `tool`. Leading-dot names like `.tmpXYZ` keep their dot.
pub fn derive_name(locator: &str) -> String {
    let trimmed = locator.trim().trim_end_matches(['/', '\\']);
    let segment = trimmed
        .rsplit(['/', '\\', ':'])
        .next()
        .unwrap_or(trimmed);

    let stem = match segment.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => segment,
    };

    if stem.is_empty() || stem == "." || stem == ".." {
        FALLBACK_NAME.to_string()
    } else {
        stem.to_string()
    }
}
