//! A recording [`ShellRunner`] for tests.
//!
//! Every executed line is recorded. Responses are matched by substring, most
//! recently registered first; lines without a registered response succeed
//! with empty output.

use super::{CommandOutput, ShellRunner};
use crate::error::{AppError, Result};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct MockShell {
    has_sudo: bool,
    lines: Mutex<Vec<String>>,
    responses: Mutex<Vec<(String, Option<CommandOutput>)>>,
}

impl MockShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sudo(mut self) -> Self {
        self.has_sudo = true;
        self
    }

    pub fn respond(&self, pattern: &str, output: CommandOutput) {
        self.responses
            .lock()
            .unwrap()
            .push((pattern.to_string(), Some(output)));
    }

    pub fn fail(&self, pattern: &str, code: i32, stderr: &str) {
        self.respond(pattern, CommandOutput::failed(code, stderr));
    }

    /// Lines containing `pattern` fail with `AppError::CommandTimeout`.
    pub fn time_out(&self, pattern: &str) {
        self.responses
            .lock()
            .unwrap()
            .push((pattern.to_string(), None));
    }

    /// All executed lines, in order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    /// True when some executed line contains `needle`.
    pub fn ran(&self, needle: &str) -> bool {
        self.lines.lock().unwrap().iter().any(|l| l.contains(needle))
    }
}

impl ShellRunner for MockShell {
    fn has_sudo(&self) -> bool {
        self.has_sudo
    }

    async fn run_line(&self, line: &str) -> Result<CommandOutput> {
        self.lines.lock().unwrap().push(line.to_string());

        let responses = self.responses.lock().unwrap();
        match responses.iter().rev().find(|(p, _)| line.contains(p.as_str())) {
            Some((_, Some(output))) => Ok(output.clone()),
            Some((_, None)) => Err(AppError::CommandTimeout {
                command: line.to_string(),
                timeout: Duration::from_secs(300),
            }),
            None => Ok(CommandOutput::ok("")),
        }
    }
}
