//! Pack Event Port
//!
//! The injected logging capability. Every component receives a sink at
//! construction and reports what it does through it; there is no global
//! logger.

use std::path::PathBuf;

/// Event emitted during a packaging run
#[derive(Debug, Clone, PartialEq)]
pub enum PackEvent {
    /// Packaging of a source started
    Started {
        locator: String,
        revision: Option<String>,
    },

    /// Workspace root is ready for use
    WorkspaceReady { root: PathBuf, generated: bool },

    /// External command about to run
    CommandStarted { command: String },

    /// External command finished
    CommandFinished {
        command: String,
        success: bool,
        duration_ms: u128,
    },

    /// App directory already held a checkout
    FetchSkipped { app_dir: PathBuf },

    /// Source cloned (and checked out) into the app directory
    Fetched {
        app_dir: PathBuf,
        revision: Option<String>,
    },

    /// No manifest present, nothing to install
    BuildSkipped { manifest: PathBuf },

    /// Manifest present without a lockfile; install continues unpinned
    LockfileMissing { manifest: PathBuf, lockfile: PathBuf },

    /// Dependencies vendored
    DependenciesInstalled {
        installer: String,
        vendor_dir: PathBuf,
    },

    /// Short version resolved (first call only)
    VersionResolved { version: String },

    /// Archive written
    Assembled {
        path: PathBuf,
        size: u64,
        checksum: String,
    },

    /// Workspace removed
    Cleaned { root: PathBuf },

    /// Workspace was already gone (or never created)
    CleanSkipped { root: Option<PathBuf> },
}

impl PackEvent {
    /// Stable event name used by machine-readable sinks
    pub fn name(&self) -> &'static str {
        match self {
            PackEvent::Started { .. } => "start",
            PackEvent::WorkspaceReady { .. } => "workspace_ready",
            PackEvent::CommandStarted { .. } => "command_start",
            PackEvent::CommandFinished { .. } => "command_finish",
            PackEvent::FetchSkipped { .. } => "fetch_skipped",
            PackEvent::Fetched { .. } => "fetched",
            PackEvent::BuildSkipped { .. } => "build_skipped",
            PackEvent::LockfileMissing { .. } => "lockfile_missing",
            PackEvent::DependenciesInstalled { .. } => "dependencies_installed",
            PackEvent::VersionResolved { .. } => "version_resolved",
            PackEvent::Assembled { .. } => "assembled",
            PackEvent::Cleaned { .. } => "cleaned",
            PackEvent::CleanSkipped { .. } => "clean_skipped",
        }
    }

    /// Per-command chatter, hidden from summary-only sinks
    pub fn is_detailed(&self) -> bool {
        matches!(
            self,
            PackEvent::CommandStarted { .. } | PackEvent::CommandFinished { .. }
        )
    }
}

/// Trait for receiving pack events
///
/// Implementations:
/// - `JsonEventSink`: NDJSON event stream for CI
/// - `TracingEventSink`: forwards to `tracing`
/// - `NoopEventSink`: silent operation
pub trait PackEventSink: Send + Sync {
    /// Handle a pack event
    fn on_event(&self, event: PackEvent);

    /// Check if this sink wants detailed (per-command) events
    fn wants_detailed_events(&self) -> bool {
        true
    }

    /// Forward `event` unless it is detailed and unwanted
    fn emit(&self, event: PackEvent) {
        if event.is_detailed() && !self.wants_detailed_events() {
            return;
        }
        self.on_event(event);
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl PackEventSink for NoopEventSink {
    fn on_event(&self, _event: PackEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
