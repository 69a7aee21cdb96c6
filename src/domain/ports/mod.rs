//! Domain Ports (Interfaces)
//!
//! The capabilities a packaging run consumes. Infrastructure provides the
//! concrete implementations; tests provide recording fakes.

pub mod archive_writer;
pub mod dependency_installer;
pub mod pack_events;
pub mod process_runner;
pub mod version_control;

pub use archive_writer::ArchiveWriter;
pub use dependency_installer::DependencyInstaller;
pub use pack_events::{NoopEventSink, PackEvent, PackEventSink};
pub use process_runner::{CommandSpec, ProcessOutput, ProcessRunner};
pub use version_control::VersionControl;
