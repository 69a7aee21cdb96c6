//! Common test utilities for Packer scenario tests.
//!
//! This module provides:
//! - `GitRepo`: Throwaway git repository with commit and tag helpers
//! - `TestEnv`: Isolated output directory plus helpers to run the CLI
//! - Archive assertions: `archive_entries`, `assert_archived!`

pub mod assertions;
pub mod env;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use env::*;
#[allow(unused_imports)]
pub use fixtures::*;
