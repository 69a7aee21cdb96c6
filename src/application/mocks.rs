//! Mock ports shared by application tests

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::ports::{DependencyInstaller, PackEvent, PackEventSink, VersionControl};
use crate::error::{PackerError, PackerResult};

/// Records every event it receives
#[derive(Default)]
pub(crate) struct RecordingEventSink {
    pub events: Mutex<Vec<PackEvent>>,
}

impl RecordingEventSink {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|e| e.name()).collect()
    }
}

impl PackEventSink for RecordingEventSink {
    fn on_event(&self, event: PackEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Version control that "clones" by writing a fixed file set
pub(crate) struct MockVcs {
    pub files: Vec<(&'static str, &'static str)>,
    pub version: String,
    pub fail_clone: bool,
    pub fail_checkout: bool,
    pub calls: Mutex<Vec<String>>,
}

impl MockVcs {
    pub fn new(files: Vec<(&'static str, &'static str)>) -> Self {
        Self {
            files,
            version: "abc1234".to_string(),
            fail_clone: false,
            fail_checkout: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn failure(step: &str) -> PackerError {
        PackerError::CommandFailed {
            program: "git".to_string(),
            args: vec![step.to_string()],
            status: Some(128),
            stderr: format!("fatal: {step} failed"),
        }
    }
}

impl VersionControl for MockVcs {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn metadata_dir(&self) -> &'static str {
        ".git"
    }

    fn clone_repo(&self, locator: &str, dest: &Path) -> PackerResult<()> {
        self.calls.lock().unwrap().push(format!("clone {locator}"));
        fs::create_dir_all(dest.join(".git"))?;
        if self.fail_clone {
            fs::write(dest.join("partial"), "half a clone")?;
            return Err(Self::failure("clone"));
        }
        for (name, content) in &self.files {
            let path = dest.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)?;
        }
        Ok(())
    }

    fn checkout(&self, _repo: &Path, revision: &str) -> PackerResult<()> {
        self.calls.lock().unwrap().push(format!("checkout {revision}"));
        if self.fail_checkout {
            return Err(Self::failure("checkout"));
        }
        Ok(())
    }

    fn short_revision(&self, _repo: &Path, revision: Option<&str>) -> PackerResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("rev-parse {}", revision.unwrap_or("HEAD")));
        Ok(self.version.clone())
    }
}

/// Installer that drops a marker file into the vendor directory
pub(crate) struct MockInstaller {
    pub fail: bool,
    pub installs: Mutex<Vec<PathBuf>>,
    vendor: PathBuf,
}

impl MockInstaller {
    pub fn new() -> Self {
        Self {
            fail: false,
            installs: Mutex::new(Vec::new()),
            vendor: PathBuf::from("vendor/bundle"),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn install_count(&self) -> usize {
        self.installs.lock().unwrap().len()
    }
}

impl DependencyInstaller for MockInstaller {
    fn name(&self) -> &str {
        "mock"
    }

    fn manifest_name(&self) -> &str {
        "Gemfile"
    }

    fn lockfile_name(&self) -> Option<&str> {
        Some("Gemfile.lock")
    }

    fn vendor_subdir(&self) -> &Path {
        &self.vendor
    }

    fn install(&self, _app_dir: &Path, vendor_dir: &Path) -> PackerResult<()> {
        self.installs.lock().unwrap().push(vendor_dir.to_path_buf());
        if self.fail {
            return Err(PackerError::CommandFailed {
                program: "bundle".to_string(),
                args: vec!["install".to_string()],
                status: Some(3),
                stderr: "Could not find gem 'nope'".to_string(),
            });
        }
        fs::create_dir_all(vendor_dir)?;
        fs::write(vendor_dir.join("installed.txt"), "ok")?;
        Ok(())
    }
}
