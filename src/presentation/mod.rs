//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating the packer with infrastructure dependencies
//! - Output formatting (text/JSON)
//!
//! ## Structure
//!
//! - `cli` - Argument definitions
//! - `factory` - Wires a `Packer` to config and event sink
//! - `output` - Result rendering

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{BackendArg, Cli, Commands};
pub use factory::{create_event_sink, create_packer};
pub use output::{OutputFormat, Rendered};
