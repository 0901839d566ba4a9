//! Runs catalog command lines through `sh -c` with a wall-clock cutoff.

use crate::error::{AppError, Result};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Per-command wall-clock budget.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(300);

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    #[cfg(test)]
    pub fn ok(stdout: &str) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    #[cfg(test)]
    pub fn failed(code: i32, stderr: &str) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Something that can execute a shell line.
///
/// The production implementation is [`SystemShell`]; tests substitute a
/// recording mock.
#[allow(async_fn_in_trait)]
pub trait ShellRunner {
    /// Whether `sudo -n true` succeeded when the runner was created.
    fn has_sudo(&self) -> bool;

    /// Executes `line` with `sh -c`.
    ///
    /// # Errors
    ///
    /// `AppError::CommandTimeout` when the cutoff is hit, `AppError::Io` when
    /// the shell cannot be spawned. A non-zero exit is *not* an error.
    async fn run_line(&self, line: &str) -> Result<CommandOutput>;
}

/// Prefixes `line` with `sudo` when it needs root and sudo is usable.
///
/// Without sudo the line runs unprivileged and is expected to fail on its
/// own; the failure is reported like any other.
pub fn with_privilege(line: &str, privileged: bool, has_sudo: bool) -> String {
    if privileged && has_sudo {
        format!("sudo {}", line)
    } else {
        line.to_string()
    }
}

/// Executes commands on the host through `/bin/sh`.
#[derive(Debug, Clone)]
pub struct SystemShell {
    has_sudo: bool,
    timeout: Duration,
}

impl SystemShell {
    pub fn new(has_sudo: bool, timeout: Duration) -> Self {
        Self { has_sudo, timeout }
    }

    /// Creates a shell with the default timeout, probing for passwordless
    /// sudo with `sudo -n true`.
    pub async fn detect() -> Self {
        let has_sudo = match Command::new("sudo")
            .args(["-n", "true"])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
        {
            Ok(status) => status.success(),
            Err(e) => {
                debug!("sudo probe failed to start: {}", e);
                false
            },
        };
        debug!("sudo available: {}", has_sudo);
        Self::new(has_sudo, COMMAND_TIMEOUT)
    }
}

impl ShellRunner for SystemShell {
    fn has_sudo(&self) -> bool {
        self.has_sudo
    }

    async fn run_line(&self, line: &str) -> Result<CommandOutput> {
        debug!("sh -c {:?}", line);

        let child = Command::new("sh")
            .arg("-c")
            .arg(line)
            .stdin(Stdio::inherit()) // sudo and emerge -a may still need the terminal
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => output?,
            Err(_) => {
                warn!("Command exceeded {:?}: {}", self.timeout, line);
                return Err(AppError::CommandTimeout {
                    command: line.to_string(),
                    timeout: self.timeout,
                });
            },
        };

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privilege_prefix_requires_sudo() {
        assert_eq!(with_privilege("sysctl -p", true, true), "sudo sysctl -p");
        assert_eq!(with_privilege("sysctl -p", true, false), "sysctl -p");
        assert_eq!(with_privilege("gsettings list", false, true), "gsettings list");
    }

    #[tokio::test]
    async fn captures_stdout_and_exit_code() {
        let shell = SystemShell::new(false, Duration::from_secs(10));
        let output = shell.run_line("echo hello").await.unwrap();
        assert!(output.success());
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn non_zero_exit_is_not_an_error() {
        let shell = SystemShell::new(false, Duration::from_secs(10));
        let output = shell.run_line("echo oops >&2; exit 3").await.unwrap();
        assert_eq!(output.code, Some(3));
        assert!(!output.success());
        assert_eq!(output.stderr.trim(), "oops");
    }

    #[tokio::test]
    async fn slow_command_times_out() {
        let shell = SystemShell::new(false, Duration::from_millis(200));
        let err = shell.run_line("sleep 5").await.unwrap_err();
        assert!(matches!(err, AppError::CommandTimeout { ref command, .. } if command == "sleep 5"));
    }
}
