//! Packer Factory
//!
//! Wires a `Packer` to its configuration and the event sink chosen by the
//! CLI flags. This is the dependency injection point for the binary.

use std::sync::Arc;

use crate::application::Packer;
use crate::config::PackerConfig;
use crate::domain::entities::PackageSource;
use crate::domain::ports::PackEventSink;
use crate::error::PackerResult;
use crate::infrastructure::{JsonEventSink, TracingEventSink};

/// Event sink for the given output mode
///
/// JSON mode streams every event to stdout. Otherwise events go to
/// `tracing`; per-command events only from `-vv` up.
pub fn create_event_sink(json: bool, verbose: u8) -> Arc<dyn PackEventSink> {
    if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(TracingEventSink::new().detailed(verbose >= 2))
    }
}

/// Create a packer for `source` with all dependencies wired up
///
/// Fails when a configured workspace root is unusable.
pub fn create_packer(
    source: PackageSource,
    config: PackerConfig,
    events: Arc<dyn PackEventSink>,
) -> PackerResult<Packer> {
    Packer::builder(source).config(config).events(events).build()
}
