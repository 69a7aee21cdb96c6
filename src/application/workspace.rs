//! Workspace Manager
//!
//! Owns the disposable staging directory of one packaging run. The root is
//! either assigned explicitly (validated before anything is written) or
//! generated lazily as a fresh temporary directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::domain::ports::{PackEvent, PackEventSink};
use crate::error::{PackerError, PackerResult};

/// Default app subdirectory name
pub const DEFAULT_APP_DIR: &str = "app";

/// File created and removed to prove the root is writable
const WRITE_PROBE: &str = ".packer-write-probe";

/// Prefix of generated temporary roots
const TEMP_PREFIX: &str = "packer-";

/// Staging directory owned by a single pipeline
pub struct WorkspaceManager {
    root: Option<PathBuf>,
    generated: bool,
    app_subdir: PathBuf,
    events: Arc<dyn PackEventSink>,
}

impl WorkspaceManager {
    pub fn new(events: Arc<dyn PackEventSink>) -> Self {
        Self {
            root: None,
            generated: false,
            app_subdir: PathBuf::from(DEFAULT_APP_DIR),
            events,
        }
    }

    /// Use a different app subdirectory name
    ///
    /// The name is checked with [`validate_app_subdir`] before the app
    /// directory is first used.
    pub fn with_app_subdir(mut self, subdir: impl Into<PathBuf>) -> Self {
        self.app_subdir = subdir.into();
        self
    }

    /// Assign the workspace root
    ///
    /// The parent must already exist; the root itself is created if absent
    /// and then write-probed. Nothing is created when the parent is missing.
    pub fn set_root(&mut self, path: impl AsRef<Path>) -> PackerResult<&Path> {
        let path = path.as_ref();
        let root = std::path::absolute(path).map_err(|e| PackerError::workspace(path, e))?;

        let parent = root
            .parent()
            .ok_or_else(|| PackerError::workspace(&root, "workspace root has no parent"))?;
        if !parent.is_dir() {
            return Err(PackerError::workspace(
                &root,
                format!("parent directory {} does not exist", parent.display()),
            ));
        }

        match fs::metadata(&root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(PackerError::workspace(&root, "path exists and is not a directory")),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::create_dir(&root).map_err(|e| PackerError::workspace(&root, e))?;
            }
            Err(e) => return Err(PackerError::workspace(&root, e)),
        }

        probe_writable(&root)?;

        if self.generated {
            self.discard_generated(&root);
        }

        self.events.emit(PackEvent::WorkspaceReady {
            root: root.clone(),
            generated: false,
        });
        self.generated = false;
        Ok(self.root.insert(root))
    }

    /// Drop a generated root that is being replaced by `next`
    fn discard_generated(&mut self, next: &Path) {
        let Some(stale) = self.root.take().filter(|stale| stale != next) else {
            return;
        };
        match fs::remove_dir_all(&stale) {
            Ok(()) => self.events.emit(PackEvent::Cleaned { root: stale }),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                root = %stale.display(),
                error = %e,
                "could not remove replaced temporary workspace"
            ),
        }
    }

    /// Take over an existing workspace for removal, without probing it
    ///
    /// Refuses non-empty directories that lack the app subdirectory, so an
    /// arbitrary directory cannot be handed to `clean` by mistake.
    pub fn adopt(&mut self, path: impl AsRef<Path>) -> PackerResult<&Path> {
        let path = path.as_ref();
        let root = std::path::absolute(path).map_err(|e| PackerError::workspace(path, e))?;
        validate_app_subdir(&self.app_subdir)?;

        match fs::symlink_metadata(&root) {
            Ok(meta) if meta.is_dir() => {
                let has_app_dir = root.join(&self.app_subdir).is_dir();
                let is_empty = fs::read_dir(&root)?.next().is_none();
                if !has_app_dir && !is_empty {
                    return Err(PackerError::workspace(
                        &root,
                        "directory does not look like a packer workspace",
                    ));
                }
            }
            Ok(_) => return Err(PackerError::workspace(&root, "path is not a directory")),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(PackerError::workspace(&root, e)),
        }

        self.generated = false;
        Ok(self.root.insert(root))
    }

    /// The configured root, if any
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Whether the root was generated as a temporary directory
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Return the root, generating a temporary directory on first use
    pub fn ensure_root(&mut self) -> PackerResult<PathBuf> {
        if let Some(root) = &self.root {
            return Ok(root.clone());
        }

        let root = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempdir()
            .map_err(|e| PackerError::workspace(std::env::temp_dir(), e))?
            .keep();

        self.events.emit(PackEvent::WorkspaceReady {
            root: root.clone(),
            generated: true,
        });
        self.generated = true;
        self.root = Some(root.clone());
        Ok(root)
    }

    /// App directory path, creating root and subdirectory on demand
    pub fn app_dir(&mut self) -> PackerResult<PathBuf> {
        validate_app_subdir(&self.app_subdir)?;
        let app_dir = self.ensure_root()?.join(&self.app_subdir);
        fs::create_dir_all(&app_dir).map_err(|e| PackerError::workspace(&app_dir, e))?;
        Ok(app_dir)
    }

    /// Whether `path` lies inside the workspace root
    pub fn contains(&self, path: &Path) -> bool {
        match &self.root {
            Some(root) => resolve_lenient(path).starts_with(resolve_lenient(root)),
            None => false,
        }
    }

    /// Recursively remove the workspace root
    ///
    /// Removing an absent workspace is not an error. Symlinked roots and
    /// filesystem roots are refused.
    pub fn clean(&mut self) -> PackerResult<()> {
        let Some(root) = self.root.clone() else {
            self.events.emit(PackEvent::CleanSkipped { root: None });
            return Ok(());
        };

        match fs::symlink_metadata(&root) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.events.emit(PackEvent::CleanSkipped { root: Some(root) });
                return Ok(());
            }
            Err(e) => return Err(PackerError::workspace(&root, e)),
            Ok(meta) if meta.file_type().is_symlink() => {
                return Err(PackerError::workspace(
                    &root,
                    "refusing to remove a symlinked workspace root",
                ));
            }
            Ok(meta) if !meta.is_dir() => {
                return Err(PackerError::workspace(&root, "workspace root is not a directory"));
            }
            Ok(_) => {}
        }

        if root.parent().is_none() {
            return Err(PackerError::workspace(
                &root,
                "refusing to remove a filesystem root",
            ));
        }

        match fs::remove_dir_all(&root) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(PackerError::workspace(&root, e)),
        }

        self.events.emit(PackEvent::Cleaned { root });
        Ok(())
    }
}

/// App subdirectories must stay inside the root: relative, no `..`
pub fn validate_app_subdir(subdir: &Path) -> PackerResult<()> {
    let mut components = subdir.components().peekable();
    if components.peek().is_none() {
        return Err(PackerError::workspace(subdir, "app directory name is empty"));
    }
    if components.all(|c| matches!(c, Component::Normal(_))) {
        Ok(())
    } else {
        Err(PackerError::workspace(
            subdir,
            "app directory must be a relative path inside the workspace",
        ))
    }
}

fn probe_writable(root: &Path) -> PackerResult<()> {
    let probe = root.join(WRITE_PROBE);
    fs::File::create(&probe).map_err(|e| PackerError::workspace(root, e))?;
    fs::remove_file(&probe).map_err(|e| PackerError::workspace(root, e))?;
    Ok(())
}

/// Canonical form of `path`, tolerating a missing final component
fn resolve_lenient(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    if let Ok(canonical) = fs::canonicalize(&absolute) {
        return canonical;
    }
    match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent)
            .map(|p| p.join(name))
            .unwrap_or(absolute),
        _ => absolute,
    }
}
