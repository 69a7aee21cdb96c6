//! Configuration module for Packer
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (PACKER_*)
//! 3. Explicit `--config` file, else `./packer.toml`, else
//!    `<config dir>/packer/config.toml`
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{
    ArchiveBackend, ArchiveConfig, GitConfig, InstallerConfig, PackerConfig, WorkspaceConfig,
};
