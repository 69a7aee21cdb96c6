//! Event Sink Implementations
//!
//! Concrete implementations of PackEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - TracingEventSink: structured log records via `tracing`

mod json;
mod tracing_sink;

pub use self::json::JsonEventSink;
pub use self::tracing_sink::TracingEventSink;
