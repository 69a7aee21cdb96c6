//! Tracing Event Sink
//!
//! Turns pack events into `tracing` records. The binary decides where they
//! go by installing a subscriber.

use crate::domain::ports::{PackEvent, PackEventSink};

/// Event sink that logs through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink {
    detailed: bool,
}

impl TracingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also log every external command
    pub fn detailed(mut self, detailed: bool) -> Self {
        self.detailed = detailed;
        self
    }
}

impl PackEventSink for TracingEventSink {
    fn on_event(&self, event: PackEvent) {
        match event {
            PackEvent::Started { locator, revision } => {
                tracing::info!(source = %locator, revision = ?revision, "packaging started");
            }
            PackEvent::WorkspaceReady { root, generated } => {
                tracing::info!(root = %root.display(), generated, "workspace ready");
            }
            PackEvent::CommandStarted { command } => {
                tracing::debug!(command = %command, "running");
            }
            PackEvent::CommandFinished {
                command,
                success,
                duration_ms,
            } => {
                if success {
                    tracing::debug!(command = %command, duration_ms = duration_ms as u64, "finished");
                } else {
                    tracing::warn!(command = %command, duration_ms = duration_ms as u64, "command failed");
                }
            }
            PackEvent::FetchSkipped { app_dir } => {
                tracing::info!(app_dir = %app_dir.display(), "repository already present, skipping fetch");
            }
            PackEvent::Fetched { app_dir, revision } => {
                tracing::info!(app_dir = %app_dir.display(), revision = ?revision, "fetched");
            }
            PackEvent::BuildSkipped { manifest } => {
                tracing::info!(manifest = %manifest.display(), "no manifest, skipping dependency install");
            }
            PackEvent::LockfileMissing { manifest, lockfile } => {
                tracing::warn!(
                    manifest = %manifest.display(),
                    lockfile = %lockfile.display(),
                    "manifest has no lockfile; dependencies will not be pinned"
                );
            }
            PackEvent::DependenciesInstalled {
                installer,
                vendor_dir,
            } => {
                tracing::info!(installer = %installer, vendor_dir = %vendor_dir.display(), "dependencies vendored");
            }
            PackEvent::VersionResolved { version } => {
                tracing::info!(version = %version, "version resolved");
            }
            PackEvent::Assembled {
                path,
                size,
                checksum,
            } => {
                tracing::info!(path = %path.display(), size, checksum = %checksum, "archive written");
            }
            PackEvent::Cleaned { root } => {
                tracing::info!(root = %root.display(), "workspace removed");
            }
            PackEvent::CleanSkipped { root } => {
                tracing::debug!(root = ?root, "workspace already absent");
            }
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.detailed
    }
}
