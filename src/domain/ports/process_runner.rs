//! Process Runner Port
//!
//! Every delegated tool (version control, installer, archiver) runs through
//! this trait, so failure detection is an explicit return value rather than
//! ambient process state.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::EnvOverrides;
use crate::error::{PackerError, PackerResult};

/// A fully described external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: EnvOverrides,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: EnvOverrides::default(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Path argument, converted lossily for display and error reporting
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy().into_owned())
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, env: EnvOverrides) -> Self {
        self.env = env;
        self
    }

    /// Program and arguments joined by spaces (for logs)
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Build the `CommandFailed` error for this command
    pub fn failure(&self, status: Option<i32>, stderr: impl Into<String>) -> PackerError {
        PackerError::CommandFailed {
            program: self.program.clone(),
            args: self.args.clone(),
            status,
            stderr: stderr.into(),
        }
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` if terminated by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Last `max_lines` non-empty lines of stderr, trimmed
    pub fn stderr_tail(&self, max_lines: usize) -> String {
        let lines: Vec<&str> = self
            .stderr
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.trim().is_empty())
            .collect();
        let start = lines.len().saturating_sub(max_lines);
        lines[start..].join("\n").trim().to_string()
    }
}

/// Stderr lines kept in a `CommandFailed` error
const STDERR_TAIL_LINES: usize = 20;

/// Runs external commands to completion
pub trait ProcessRunner: Send + Sync {
    /// Run `spec` and capture its output
    ///
    /// Returns `Err(CommandFailed)` only when the process could not be
    /// started; a non-zero exit is reported through `ProcessOutput::status`.
    fn run(&self, spec: &CommandSpec) -> PackerResult<ProcessOutput>;

    /// Run `spec` and turn any unsuccessful exit into `CommandFailed`
    fn run_checked(&self, spec: &CommandSpec) -> PackerResult<ProcessOutput> {
        let output = self.run(spec)?;
        if output.success() {
            Ok(output)
        } else {
            Err(spec.failure(output.status, output.stderr_tail(STDERR_TAIL_LINES)))
        }
    }
}
