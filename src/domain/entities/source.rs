//! Package source entity

use std::fmt;

/// What to fetch: a repository locator and an optional revision
///
/// `locator` is a local path or a URL understood by the version-control
/// client. Without a revision the client's default branch tip is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSource {
    locator: String,
    revision: Option<String>,
}

impl PackageSource {
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            revision: None,
        }
    }

    /// Pin a branch, tag, or commit
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        let revision = revision.into();
        self.revision = if revision.trim().is_empty() {
            None
        } else {
            Some(revision)
        };
        self
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }
}

impl From<&str> for PackageSource {
    fn from(locator: &str) -> Self {
        Self::new(locator)
    }
}

impl From<String> for PackageSource {
    fn from(locator: String) -> Self {
        Self::new(locator)
    }
}

impl fmt::Display for PackageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.revision {
            Some(rev) => write!(f, "{}@{}", self.locator, rev),
            None => write!(f, "{}", self.locator),
        }
    }
}
