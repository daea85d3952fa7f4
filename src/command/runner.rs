//! Runners that execute (or record) EAGLE invocations.

use crate::error::{CamError, Result};
use std::process::Command;
use tracing::debug;

use super::EagleCommand;

/// Exit status of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    /// Exit code, or `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl RunStatus {
    pub fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "{}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// Something that can carry out an [`EagleCommand`].
pub trait CommandRunner {
    fn run(&mut self, command: &EagleCommand) -> Result<RunStatus>;
}

/// Runs commands as child processes and waits for each to finish.
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&mut self, command: &EagleCommand) -> Result<RunStatus> {
        let status = Command::new(&command.program)
            .args(&command.args)
            .status()
            .map_err(|source| CamError::SpawnFailed {
                program: command.program.clone(),
                source,
            })?;
        debug!("{} exited with {:?}", command.program.display(), status);
        Ok(RunStatus {
            code: status.code(),
        })
    }
}

/// Records commands without executing them.
#[derive(Debug, Default)]
pub struct DryRunRunner {
    pub commands: Vec<EagleCommand>,
}

impl CommandRunner for DryRunRunner {
    fn run(&mut self, command: &EagleCommand) -> Result<RunStatus> {
        self.commands.push(command.clone());
        Ok(RunStatus::exited(0))
    }
}
