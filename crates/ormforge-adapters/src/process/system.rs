//! Process runner backed by `std::process::Command`.

use std::path::Path;
use std::process::{Command, Stdio};

use ormforge_core::{
    application::{
        ApplicationError,
        ports::{ProcessOutput, ProcessRunner},
    },
    error::ForgeResult,
};
use tracing::{debug, instrument};

/// Runs programs on the host and waits for them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    #[instrument(skip_all, fields(program = %program, args = ?args, cwd = %cwd.display()))]
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> ForgeResult<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ApplicationError::ProcessFailed {
                command: command_line(program, args),
                reason: e.to_string(),
            })?;

        debug!(status = ?output.status.code(), "process finished");
        Ok(ProcessOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

pub(crate) fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
