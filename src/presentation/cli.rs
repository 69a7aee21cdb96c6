//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! Global flags (--json, --verbose, --config) are inherited by all
//! subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::ArchiveBackend;

/// Archive backend selectable on the command line
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendArg {
    Builtin,
    Tar,
}

impl From<BackendArg> for ArchiveBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Builtin => ArchiveBackend::Builtin,
            BackendArg::Tar => ArchiveBackend::Tar,
        }
    }
}

/// Packer - package a git repository with its vendored dependencies
#[derive(Parser, Debug)]
#[command(name = "packer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events and results for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ./packer.toml, then the user config dir)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch, vendor, and archive a repository
    Pack {
        /// Repository path or URL
        source: String,

        /// Branch, tag, or commit to package
        #[arg(short, long)]
        revision: Option<String>,

        /// Archive path (default: <output_dir>/<name>-<version>.tar.gz)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Workspace directory (default: a fresh temporary directory)
        #[arg(long)]
        workdir: Option<PathBuf>,

        /// Keep the workspace after a successful run
        #[arg(long)]
        keep_workdir: bool,

        /// Archive backend
        #[arg(long, value_enum)]
        backend: Option<BackendArg>,
    },

    /// Fetch and vendor into a workspace, then print the app directory
    Fetch {
        /// Repository path or URL
        source: String,

        /// Branch, tag, or commit to fetch
        #[arg(short, long)]
        revision: Option<String>,

        /// Workspace directory (default: a fresh temporary directory)
        #[arg(long)]
        workdir: Option<PathBuf>,
    },

    /// Print the short version a pack of this revision would carry
    Version {
        /// Repository path or URL
        source: String,

        /// Branch, tag, or commit
        #[arg(short, long)]
        revision: Option<String>,

        /// Workspace directory (default: a fresh temporary directory)
        #[arg(long)]
        workdir: Option<PathBuf>,
    },

    /// Remove a workspace left behind by `fetch`, `--keep-workdir` or a failed run
    Clean {
        /// Workspace directory to remove
        #[arg(long)]
        workdir: PathBuf,
    },
}
