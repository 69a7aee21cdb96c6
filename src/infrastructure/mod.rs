//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all process and archive I/O.
//!
//! ## Structure
//!
//! - `process/` - External command execution
//! - `vcs/` - Version control (git)
//! - `installer/` - Dependency installers (bundler by default)
//! - `archive/` - tar.gz writers (builtin, external tar)
//! - `events/` - Event sinks (JSON, tracing)

pub mod archive;
pub mod events;
pub mod installer;
pub mod process;
pub mod vcs;

// Re-export for convenience
pub use archive::{TarCommandWriter, TarGzWriter};
pub use events::{JsonEventSink, TracingEventSink};
pub use installer::CommandInstaller;
pub use process::SystemProcessRunner;
pub use vcs::GitCli;
