//! Packer Pipeline
//!
//! Orchestrates one packaging run: fetch, build, assemble, clean. Each step
//! is callable on its own; calling a step runs any earlier step that has
//! not completed yet. Once the workspace is cleaned the run is over and
//! only `clean` (a no-op) remains callable.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{ArchiveBackend, PackerConfig};
use crate::domain::entities::{Artifact, PackageIdentity, PackageSource};
use crate::domain::ports::{
    ArchiveWriter, DependencyInstaller, NoopEventSink, PackEvent, PackEventSink, ProcessRunner,
    VersionControl,
};
use crate::domain::value_objects::PackStage;
use crate::error::{PackerError, PackerResult};
use crate::infrastructure::{
    CommandInstaller, GitCli, SystemProcessRunner, TarCommandWriter, TarGzWriter,
};

use super::archiver::Archiver;
use super::dependencies::DependencyBuilder;
use super::fetcher::SourceFetcher;
use super::version::VersionResolver;
use super::workspace::{validate_app_subdir, WorkspaceManager};

/// A single packaging run for one source
pub struct Packer {
    source: PackageSource,
    stage: PackStage,
    started: bool,
    workspace: WorkspaceManager,
    fetcher: SourceFetcher,
    builder: DependencyBuilder,
    resolver: VersionResolver,
    archiver: Archiver,
    output_dir: PathBuf,
    keep_workspace: bool,
    events: Arc<dyn PackEventSink>,
}

impl Packer {
    /// Packer with default configuration and system tools
    pub fn new(source: impl Into<PackageSource>) -> Self {
        let builder = Self::builder(source);
        builder.assemble_parts()
    }

    pub fn builder(source: impl Into<PackageSource>) -> PackerBuilder {
        PackerBuilder::new(source.into())
    }

    pub fn source(&self) -> &PackageSource {
        &self.source
    }

    pub fn stage(&self) -> PackStage {
        self.stage
    }

    /// Assign the workspace root; fails before anything is written when
    /// the location is unusable
    ///
    /// Only possible before the first fetch. A generated temporary root
    /// being replaced is removed.
    pub fn set_workdir(&mut self, path: impl AsRef<Path>) -> PackerResult<PathBuf> {
        if self.stage != PackStage::Init {
            return Err(PackerError::StageViolation {
                step: "set workdir",
                stage: self.stage,
            });
        }
        Ok(self.workspace.set_root(path)?.to_path_buf())
    }

    /// Workspace root, generating a temporary one on first use
    pub fn workdir(&mut self) -> PackerResult<PathBuf> {
        self.ensure_active("create workdir")?;
        self.workspace.ensure_root()
    }

    /// The workspace root if one has been assigned or generated
    pub fn current_workdir(&self) -> Option<&Path> {
        self.workspace.root()
    }

    /// App directory inside the workspace
    pub fn app_dir(&mut self) -> PackerResult<PathBuf> {
        self.ensure_active("create app directory")?;
        self.workspace.app_dir()
    }

    /// Clone the source into the app directory (idempotent)
    pub fn fetch(&mut self) -> PackerResult<()> {
        self.ensure_active("fetch")?;
        self.announce();
        let app_dir = self.workspace.app_dir()?;
        self.fetcher.fetch(&self.source, &app_dir)?;
        self.stage = self.stage.advance(PackStage::Fetched);
        Ok(())
    }

    /// Vendor dependencies, fetching first if needed
    pub fn build(&mut self) -> PackerResult<()> {
        self.ensure_active("build")?;
        if self.stage.has_reached(PackStage::Built) {
            return Ok(());
        }
        if !self.stage.has_reached(PackStage::Fetched) {
            self.fetch()?;
        }
        let app_dir = self.workspace.app_dir()?;
        self.builder.build(&app_dir)?;
        self.stage = self.stage.advance(PackStage::Built);
        Ok(())
    }

    /// Short version of the fetched revision, memoized for the run
    pub fn version(&mut self) -> PackerResult<String> {
        if let Some(version) = self.resolver.cached() {
            return Ok(version.to_string());
        }
        self.ensure_active("resolve version")?;
        if !self.stage.has_reached(PackStage::Fetched) {
            self.fetch()?;
        }
        let app_dir = self.workspace.app_dir()?;
        self.resolver.resolve(&self.fetcher, &self.source, &app_dir)
    }

    /// Name and version labelling the artifact
    pub fn identity(&mut self) -> PackerResult<PackageIdentity> {
        let version = self.version()?;
        Ok(PackageIdentity::new(&self.source, version))
    }

    /// `<output_dir>/<name>-<version>.tar.gz`, made absolute
    pub fn default_output_path(&mut self) -> PackerResult<PathBuf> {
        let identity = self.identity()?;
        let path = self.output_dir.join(identity.archive_file_name());
        Ok(std::path::absolute(&path)?)
    }

    /// Write the archive, building first if needed
    ///
    /// Without `output` the default output path is used. Paths inside the
    /// workspace are refused since `clean` would delete them.
    pub fn assemble(&mut self, output: Option<&Path>) -> PackerResult<Artifact> {
        self.ensure_active("assemble")?;
        let explicit = output.map(std::path::absolute).transpose()?;
        if let Some(path) = &explicit {
            self.ensure_outside_workspace(path)?;
        }
        self.build()?;

        let output = match explicit {
            Some(path) => path,
            None => self.default_output_path()?,
        };
        self.ensure_outside_workspace(&output)?;

        let app_dir = self.workspace.app_dir()?;
        let artifact = self.archiver.assemble(&app_dir, &output)?;
        self.stage = self.stage.advance(PackStage::Assembled);
        Ok(artifact)
    }

    /// Remove the workspace (idempotent) and end the run
    pub fn clean(&mut self) -> PackerResult<()> {
        self.workspace.clean()?;
        self.stage = PackStage::Cleaned;
        Ok(())
    }

    /// Fetch, build, assemble, then clean
    ///
    /// The workspace is removed on success unless configured to be kept.
    /// On failure it is left in place for inspection; call `clean` to
    /// dispose of it. The version is resolved before cleaning, so
    /// `identity` keeps working afterwards.
    pub fn pack(&mut self, output: Option<&Path>) -> PackerResult<Artifact> {
        let artifact = self.assemble(output)?;
        self.version()?;
        if self.keep_workspace {
            tracing::info!(
                workdir = ?self.workspace.root(),
                "keeping workspace"
            );
        } else {
            self.clean()?;
        }
        Ok(artifact)
    }

    fn ensure_active(&self, step: &'static str) -> PackerResult<()> {
        if self.stage.is_terminal() {
            return Err(PackerError::StageViolation {
                step,
                stage: self.stage,
            });
        }
        Ok(())
    }

    fn ensure_outside_workspace(&self, output: &Path) -> PackerResult<()> {
        match self.workspace.root() {
            Some(root) if self.workspace.contains(output) => {
                Err(PackerError::ArtifactInsideWorkspace {
                    output: output.to_path_buf(),
                    root: root.to_path_buf(),
                })
            }
            _ => Ok(()),
        }
    }

    fn announce(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.events.emit(PackEvent::Started {
            locator: self.source.locator().to_string(),
            revision: self.source.revision().map(str::to_string),
        });
    }
}

impl std::fmt::Debug for Packer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Packer")
            .field("source", &self.source)
            .field("stage", &self.stage)
            .field("workdir", &self.workspace.root())
            .finish()
    }
}

/// Builder wiring a `Packer` to its configuration and ports
///
/// Ports left unset default to the system implementations selected by the
/// configuration.
pub struct PackerBuilder {
    source: PackageSource,
    config: PackerConfig,
    events: Arc<dyn PackEventSink>,
    runner: Option<Arc<dyn ProcessRunner>>,
    vcs: Option<Arc<dyn VersionControl>>,
    installer: Option<Arc<dyn DependencyInstaller>>,
    archive_writer: Option<Arc<dyn ArchiveWriter>>,
}

impl PackerBuilder {
    fn new(source: PackageSource) -> Self {
        Self {
            source,
            config: PackerConfig::default(),
            events: Arc::new(NoopEventSink),
            runner: None,
            vcs: None,
            installer: None,
            archive_writer: None,
        }
    }

    pub fn config(mut self, config: PackerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn events(mut self, events: Arc<dyn PackEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn process_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    pub fn version_control(mut self, vcs: Arc<dyn VersionControl>) -> Self {
        self.vcs = Some(vcs);
        self
    }

    pub fn installer(mut self, installer: Arc<dyn DependencyInstaller>) -> Self {
        self.installer = Some(installer);
        self
    }

    pub fn archive_writer(mut self, writer: Arc<dyn ArchiveWriter>) -> Self {
        self.archive_writer = Some(writer);
        self
    }

    pub fn workdir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.workspace.root = Some(path.into());
        self
    }

    pub fn keep_workdir(mut self, keep: bool) -> Self {
        self.config.workspace.keep = keep;
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.archive.output_dir = dir.into();
        self
    }

    pub fn backend(mut self, backend: ArchiveBackend) -> Self {
        self.config.archive.backend = backend;
        self
    }

    /// Build the packer, validating the app directory name and a
    /// configured workspace root
    pub fn build(self) -> PackerResult<Packer> {
        validate_app_subdir(Path::new(&self.config.workspace.app_dir))?;
        let root = self.config.workspace.root.clone();
        let mut packer = self.assemble_parts();
        if let Some(root) = root {
            packer.workspace.set_root(root)?;
        }
        Ok(packer)
    }

    /// Wire components without touching the filesystem
    fn assemble_parts(self) -> Packer {
        let events = self.events;
        let runner = self
            .runner
            .unwrap_or_else(|| Arc::new(SystemProcessRunner::new(events.clone())));

        let vcs = self.vcs.unwrap_or_else(|| {
            Arc::new(GitCli::with_program(
                self.config.git.program.clone(),
                runner.clone(),
            ))
        });
        let installer = self.installer.unwrap_or_else(|| {
            Arc::new(CommandInstaller::from_config(
                &self.config.installer,
                runner.clone(),
            ))
        });
        let writer = self
            .archive_writer
            .unwrap_or_else(|| default_writer(self.config.archive.backend, runner.clone()));

        let exclude = std::iter::once(vcs.metadata_dir().to_string())
            .chain(self.config.archive.exclude.iter().cloned());

        Packer {
            source: self.source,
            stage: PackStage::Init,
            started: false,
            workspace: WorkspaceManager::new(events.clone())
                .with_app_subdir(&self.config.workspace.app_dir),
            fetcher: SourceFetcher::new(vcs.clone(), events.clone()),
            builder: DependencyBuilder::new(installer, events.clone()),
            resolver: VersionResolver::new(vcs, events.clone()),
            archiver: Archiver::new(writer, events.clone()).with_exclude(exclude),
            output_dir: self.config.archive.output_dir,
            keep_workspace: self.config.workspace.keep,
            events,
        }
    }
}

fn default_writer(backend: ArchiveBackend, runner: Arc<dyn ProcessRunner>) -> Arc<dyn ArchiveWriter> {
    match backend {
        ArchiveBackend::Builtin => Arc::new(TarGzWriter::new()),
        ArchiveBackend::Tar => Arc::new(TarCommandWriter::new(runner)),
    }
}
