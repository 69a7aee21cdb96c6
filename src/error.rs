//! Error types for Packer
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::value_objects::PackStage;

/// Result type alias for Packer operations
pub type PackerResult<T> = Result<T, PackerError>;

/// Main error type for Packer operations
#[derive(Error, Debug)]
pub enum PackerError {
    /// Workspace root could not be created or verified writable
    #[error("workspace problem at {path}: {reason}")]
    WorkspaceProblem { path: PathBuf, reason: String },

    /// Fetch target holds files that are not a checkout
    #[error("app directory {path} is not empty and holds no repository")]
    WorkspaceNotEmpty { path: PathBuf },

    /// An external command exited unsuccessfully or could not be started
    #[error("command failed ({}): {}{}", status_label(.status), command_line(.program, .args), stderr_suffix(.stderr))]
    CommandFailed {
        program: String,
        args: Vec<String>,
        status: Option<i32>,
        stderr: String,
    },

    /// The artifact would be removed together with the workspace
    #[error("artifact path {output} lies inside workspace {root}")]
    ArtifactInsideWorkspace { output: PathBuf, root: PathBuf },

    /// A step was requested after the pipeline finished
    #[error("cannot {step}: pipeline is already {stage}")]
    StageViolation { step: &'static str, stage: PackStage },

    /// In-process archive codec failure
    #[error("failed to write archive {path}: {message}")]
    Archive { path: PathBuf, message: String },

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PackerError {
    /// Build a `WorkspaceProblem` from any displayable cause
    pub fn workspace(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        PackerError::WorkspaceProblem {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error came from a delegated external process
    pub fn is_command_failure(&self) -> bool {
        matches!(self, PackerError::CommandFailed { .. })
    }
}

fn status_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit code {}", code),
        None => "no exit code".to_string(),
    }
}

fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\n{}", stderr)
    }
}
