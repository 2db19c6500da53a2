// ssm-loader: SSM Parameter Store environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and exit status mapping.
//!
//! ```text
//! run()
//!   |
//!   v
//! resolve() --> ExecutableNotFound
//!   |
//!   v
//! build_command()
//! argv[0] as typed, env_clear + namespace + opaque vars, stdio inherit
//!   |
//!   v
//! spawn() --> SpawnFailed
//!   |
//!   v
//! wait, ignoring Ctrl-C --> WaitFailed
//!   |
//!   v
//! code 0 --> Ok(())
//! code n --> NonZeroExit
//! signal --> Signaled
//! ```

use std::path::Path;
use std::process::{ExitStatus, Stdio};

use tokio::process::{Child, Command};
use tracing::{debug, trace};

use super::builder::ProcessBuilder;
use crate::error::ProcessError;

impl ProcessBuilder {
    /// Spawns the process with inherited stdio and waits for it to exit.
    ///
    /// Ctrl-C is not acted on by the loader while the child runs. The child
    /// shares the terminal's process group and receives the interrupt itself,
    /// so its own exit status is what gets reported.
    ///
    /// # Errors
    ///
    /// Returns an error if the executable cannot be found or spawned, if
    /// waiting fails, or if the process does not exit with code 0.
    pub async fn run(self) -> Result<(), ProcessError> {
        let program = self.resolve()?;
        let cmd_line = self.command_line();

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(
            cmd = %cmd_line,
            vars = self.environment().len(),
            opaque = self.opaque_environment().len(),
            "exec"
        );

        let mut child = self
            .build_command(&program)
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;

        trace!(program = %program.display(), pid = ?child.id(), "spawned");

        let status = wait_ignoring_interrupts(&mut child)
            .await
            .map_err(|source| ProcessError::WaitFailed {
                command: cmd_line.clone(),
                source,
            })?;

        trace!(%status, "completed");
        check_status(cmd_line, status)
    }

    /// Builds the tokio Command from this builder's configuration.
    ///
    /// `program` is the resolved path; the child still sees the name it
    /// was given as `argv[0]`.
    fn build_command(&self, program: &Path) -> Command {
        let mut command = Command::new(program);

        #[cfg(unix)]
        command.arg0(self.program());
        command.args(self.args_slice());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        command.env_clear();
        for (key, value) in self.environment().iter() {
            command.env(key, value);
        }
        for (key, value) in self.opaque_environment() {
            command.env(key, value);
        }

        command
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        command
    }
}

/// Waits for `child`, swallowing Ctrl-C until it exits.
async fn wait_ignoring_interrupts(child: &mut Child) -> std::io::Result<ExitStatus> {
    let mut listening = true;
    loop {
        tokio::select! {
            status = child.wait() => return status,
            result = tokio::signal::ctrl_c(), if listening => match result {
                Ok(()) => debug!("interrupt received, waiting for child to exit"),
                Err(err) => {
                    debug!(error = %err, "cannot listen for interrupts");
                    listening = false;
                }
            },
        }
    }
}

/// Maps an exit status onto the loader's result.
fn check_status(command: String, status: ExitStatus) -> Result<(), ProcessError> {
    if status.success() {
        return Ok(());
    }

    if let Some(code) = status.code() {
        return Err(ProcessError::NonZeroExit { command, code });
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt as _;
        if let Some(signal) = status.signal() {
            return Err(ProcessError::Signaled { command, signal });
        }
    }

    Err(ProcessError::NonZeroExit { command, code: 1 })
}
