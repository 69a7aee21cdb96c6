//! Version Resolver
//!
//! Computes the short revision identifier of a fetched source once and
//! remembers it for the rest of the run.

use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::PackageSource;
use crate::domain::ports::{PackEvent, PackEventSink, VersionControl};
use crate::error::PackerResult;

use super::fetcher::SourceFetcher;

pub struct VersionResolver {
    vcs: Arc<dyn VersionControl>,
    events: Arc<dyn PackEventSink>,
    resolved: Option<String>,
}

impl VersionResolver {
    pub fn new(vcs: Arc<dyn VersionControl>, events: Arc<dyn PackEventSink>) -> Self {
        Self {
            vcs,
            events,
            resolved: None,
        }
    }

    /// The memoized version, if already resolved
    pub fn cached(&self) -> Option<&str> {
        self.resolved.as_deref()
    }

    /// Resolve the short version of `source` checked out in `app_dir`
    ///
    /// Fetches first when no checkout is present. After the first success
    /// the same value is returned without consulting version control.
    pub fn resolve(
        &mut self,
        fetcher: &SourceFetcher,
        source: &PackageSource,
        app_dir: &Path,
    ) -> PackerResult<String> {
        if let Some(version) = &self.resolved {
            return Ok(version.clone());
        }

        if !fetcher.is_fetched(app_dir) {
            fetcher.fetch(source, app_dir)?;
        }

        let version = self.vcs.short_revision(app_dir, source.revision())?;
        tracing::debug!(%version, "resolved package version");
        self.events.emit(PackEvent::VersionResolved {
            version: version.clone(),
        });
        Ok(self.resolved.insert(version).clone())
    }
}
