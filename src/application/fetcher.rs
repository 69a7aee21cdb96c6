//! Source Fetcher
//!
//! Materializes a source at its revision inside the app directory.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::PackageSource;
use crate::domain::ports::{PackEvent, PackEventSink, VersionControl};
use crate::error::{PackerError, PackerResult};

/// What `fetch` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A checkout was already present
    Skipped,
    /// Cloned (and checked out if a revision was pinned)
    Cloned,
}

/// Clones sources into an app directory
pub struct SourceFetcher {
    vcs: Arc<dyn VersionControl>,
    events: Arc<dyn PackEventSink>,
}

impl SourceFetcher {
    pub fn new(vcs: Arc<dyn VersionControl>, events: Arc<dyn PackEventSink>) -> Self {
        Self { vcs, events }
    }

    /// Whether `app_dir` already holds a checkout
    pub fn is_fetched(&self, app_dir: &Path) -> bool {
        self.vcs.is_checkout(app_dir)
    }

    /// Clone `source` into `app_dir` and check out its revision
    ///
    /// Idempotent: an existing checkout is left untouched. A non-empty
    /// directory without a checkout is refused. If clone or checkout fails
    /// the directory is emptied again so no partial checkout survives.
    pub fn fetch(&self, source: &PackageSource, app_dir: &Path) -> PackerResult<FetchOutcome> {
        if self.is_fetched(app_dir) {
            tracing::debug!(app_dir = %app_dir.display(), "checkout already present");
            self.events.emit(PackEvent::FetchSkipped {
                app_dir: app_dir.to_path_buf(),
            });
            return Ok(FetchOutcome::Skipped);
        }

        fs::create_dir_all(app_dir).map_err(|e| PackerError::workspace(app_dir, e))?;
        if fs::read_dir(app_dir)?.next().is_some() {
            return Err(PackerError::WorkspaceNotEmpty {
                path: app_dir.to_path_buf(),
            });
        }

        if let Err(err) = self.clone_and_checkout(source, app_dir) {
            if let Err(cleanup) = clear_dir(app_dir) {
                tracing::warn!(
                    app_dir = %app_dir.display(),
                    error = %cleanup,
                    "failed to remove partial checkout"
                );
            }
            return Err(err);
        }

        self.events.emit(PackEvent::Fetched {
            app_dir: app_dir.to_path_buf(),
            revision: source.revision().map(str::to_string),
        });
        Ok(FetchOutcome::Cloned)
    }

    fn clone_and_checkout(&self, source: &PackageSource, app_dir: &Path) -> PackerResult<()> {
        self.vcs.clone_repo(source.locator(), app_dir)?;
        if let Some(revision) = source.revision() {
            self.vcs.checkout(app_dir, revision)?;
        }
        Ok(())
    }
}

/// Remove everything inside `dir`, keeping `dir` itself
fn clear_dir(dir: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mocks::{MockVcs, RecordingEventSink};
    use tempfile::tempdir;

    fn fetcher(vcs: MockVcs) -> (SourceFetcher, Arc<MockVcs>, Arc<RecordingEventSink>) {
        let vcs = Arc::new(vcs);
        let events = RecordingEventSink::shared();
        (
            SourceFetcher::new(vcs.clone(), events.clone()),
            vcs,
            events,
        )
    }

    #[test]
    fn fetch_clones_and_checks_out_revision() {
        let dir = tempdir().unwrap();
        let app = dir.path().join("app");
        let (fetcher, vcs, events) = fetcher(MockVcs::new(vec![("README", "hi")]));
        let source = PackageSource::new("/srv/repo").with_revision("v1");

        let outcome = fetcher.fetch(&source, &app).unwrap();

        assert_eq!(outcome, FetchOutcome::Cloned);
        assert!(app.join("README").is_file());
        assert_eq!(vcs.calls(), vec!["clone /srv/repo", "checkout v1"]);
        assert_eq!(events.names(), vec!["fetched"]);
    }

    #[test]
    fn fetch_without_revision_skips_checkout() {
        let dir = tempdir().unwrap();
        let (fetcher, vcs, _) = fetcher(MockVcs::new(vec![]));

        fetcher
            .fetch(&PackageSource::new("/srv/repo"), &dir.path().join("app"))
            .unwrap();

        assert_eq!(vcs.calls(), vec!["clone /srv/repo"]);
    }

    #[test]
    fn second_fetch_is_skipped() {
        let dir = tempdir().unwrap();
        let app = dir.path().join("app");
        let (fetcher, vcs, events) = fetcher(MockVcs::new(vec![("README", "hi")]));
        let source = PackageSource::new("/srv/repo");

        fetcher.fetch(&source, &app).unwrap();
        let outcome = fetcher.fetch(&source, &app).unwrap();

        assert_eq!(outcome, FetchOutcome::Skipped);
        assert_eq!(vcs.calls().len(), 1);
        assert_eq!(events.names(), vec!["fetched", "fetch_skipped"]);
    }

    #[test]
    fn non_empty_directory_without_checkout_is_refused() {
        let dir = tempdir().unwrap();
        let app = dir.path().join("app");
        fs::create_dir_all(&app).unwrap();
        fs::write(app.join("stray"), "x").unwrap();
        let (fetcher, vcs, _) = fetcher(MockVcs::new(vec![]));

        let err = fetcher
            .fetch(&PackageSource::new("/srv/repo"), &app)
            .unwrap_err();

        assert!(matches!(err, PackerError::WorkspaceNotEmpty { .. }));
        assert!(vcs.calls().is_empty());
        assert!(app.join("stray").exists());
    }

    #[test]
    fn failed_clone_leaves_directory_empty() {
        let dir = tempdir().unwrap();
        let app = dir.path().join("app");
        let mut vcs = MockVcs::new(vec![]);
        vcs.fail_clone = true;
        let (fetcher, _, events) = fetcher(vcs);

        let err = fetcher
            .fetch(&PackageSource::new("/nowhere"), &app)
            .unwrap_err();

        assert!(err.is_command_failure());
        assert!(fs::read_dir(&app).unwrap().next().is_none());
        assert!(!fetcher.is_fetched(&app));
        assert!(events.names().is_empty());
    }

    #[test]
    fn failed_checkout_leaves_directory_empty() {
        let dir = tempdir().unwrap();
        let app = dir.path().join("app");
        let mut vcs = MockVcs::new(vec![("README", "hi")]);
        vcs.fail_checkout = true;
        let (fetcher, _, _) = fetcher(vcs);
        let source = PackageSource::new("/srv/repo").with_revision("no-such-rev");

        let err = fetcher.fetch(&source, &app).unwrap_err();

        assert!(err.is_command_failure());
        assert!(fs::read_dir(&app).unwrap().next().is_none());
    }
}
