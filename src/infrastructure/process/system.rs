//! System Process Runner
//!
//! Runs commands with `std::process::Command`, blocking until they exit.
//! stdin is closed so a delegated tool can never stall waiting for input.

use std::process::{Command, Stdio};
use std::sync::Arc;
use std::time::Instant;

use crate::domain::ports::{CommandSpec, PackEvent, PackEventSink, ProcessOutput, ProcessRunner};
use crate::error::PackerResult;

/// Runs commands as child processes of the current process
pub struct SystemProcessRunner {
    events: Arc<dyn PackEventSink>,
}

impl SystemProcessRunner {
    pub fn new(events: Arc<dyn PackEventSink>) -> Self {
        Self { events }
    }

    fn build_command(spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(cwd) = &spec.cwd {
            cmd.current_dir(cwd);
        }

        for (key, value) in spec.env.iter() {
            match value {
                Some(value) => cmd.env(key, value),
                None => cmd.env_remove(key),
            };
        }

        cmd
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, spec: &CommandSpec) -> PackerResult<ProcessOutput> {
        let command = spec.command_line();
        tracing::debug!(command = %command, cwd = ?spec.cwd, env = ?spec.env, "running command");
        self.events.emit(PackEvent::CommandStarted {
            command: command.clone(),
        });

        let started = Instant::now();
        let output = Self::build_command(spec)
            .output()
            .map_err(|e| spec.failure(None, e.to_string()))?;
        let duration_ms = started.elapsed().as_millis();

        let result = ProcessOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        tracing::debug!(
            command = %command,
            status = ?result.status,
            duration_ms = duration_ms as u64,
            "command finished"
        );
        self.events.emit(PackEvent::CommandFinished {
            command,
            success: result.success(),
            duration_ms,
        });

        Ok(result)
    }
}
