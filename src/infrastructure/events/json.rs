//! JSON Event Sink
//!
//! Outputs pack events as NDJSON for CI/automation consumption.

use crate::domain::ports::{PackEvent, PackEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl PackEventSink for JsonEventSink {
    fn on_event(&self, event: PackEvent) {
        let name = event.name();
        let json = match event {
            PackEvent::Started { locator, revision } => {
                serde_json::json!({
                    "event": name,
                    "source": locator,
                    "revision": revision,
                })
            }

            PackEvent::WorkspaceReady { root, generated } => {
                serde_json::json!({
                    "event": name,
                    "root": root.display().to_string(),
                    "generated": generated,
                })
            }

            PackEvent::CommandStarted { command } => {
                serde_json::json!({
                    "event": name,
                    "command_line": command,
                })
            }

            PackEvent::CommandFinished {
                command,
                success,
                duration_ms,
            } => {
                serde_json::json!({
                    "event": name,
                    "command_line": command,
                    "status": if success { "success" } else { "failure" },
                    "duration_ms": duration_ms as u64,
                })
            }

            PackEvent::FetchSkipped { app_dir } => {
                serde_json::json!({
                    "event": name,
                    "app_dir": app_dir.display().to_string(),
                    "reason": "already fetched",
                })
            }

            PackEvent::Fetched { app_dir, revision } => {
                serde_json::json!({
                    "event": name,
                    "app_dir": app_dir.display().to_string(),
                    "revision": revision,
                })
            }

            PackEvent::BuildSkipped { manifest } => {
                serde_json::json!({
                    "event": name,
                    "manifest": manifest.display().to_string(),
                    "reason": "no manifest",
                })
            }

            PackEvent::LockfileMissing { manifest, lockfile } => {
                serde_json::json!({
                    "event": name,
                    "manifest": manifest.display().to_string(),
                    "lockfile": lockfile.display().to_string(),
                })
            }

            PackEvent::DependenciesInstalled {
                installer,
                vendor_dir,
            } => {
                serde_json::json!({
                    "event": name,
                    "installer": installer,
                    "vendor_dir": vendor_dir.display().to_string(),
                })
            }

            PackEvent::VersionResolved { version } => {
                serde_json::json!({
                    "event": name,
                    "version": version,
                })
            }

            PackEvent::Assembled {
                path,
                size,
                checksum,
            } => {
                serde_json::json!({
                    "event": name,
                    "path": path.display().to_string(),
                    "size": size,
                    "checksum": checksum,
                })
            }

            PackEvent::Cleaned { root } => {
                serde_json::json!({
                    "event": name,
                    "root": root.display().to_string(),
                })
            }

            PackEvent::CleanSkipped { root } => {
                serde_json::json!({
                    "event": name,
                    "root": root.map(|r| r.display().to_string()),
                })
            }
        };

        self.write_event(json);
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}
