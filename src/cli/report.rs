//! User-facing status lines.
//!
//! Each line is printed to stdout as `[HH:MM:SS] <icon> <message>` in the
//! colour of its status, and mirrored into the log through `tracing`.

use chrono::Local;
use colored::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Info,
    Success,
    Warning,
    Error,
    Install,
}

impl Status {
    fn icon(&self) -> &'static str {
        match self {
            Status::Info => "ℹ️",
            Status::Success => "✅",
            Status::Warning => "⚠️",
            Status::Error => "❌",
            Status::Install => "📦",
        }
    }

    fn paint(&self, text: &str) -> ColoredString {
        match self {
            Status::Info => text.cyan(),
            Status::Success => text.green(),
            Status::Warning => text.yellow(),
            Status::Error => text.red(),
            Status::Install => text.magenta(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Info => "INFO",
            Status::Success => "SUCCESS",
            Status::Warning => "WARNING",
            Status::Error => "ERROR",
            Status::Install => "INSTALL",
        }
    }
}

/// Formats a status line without colour.
pub fn format_line(status: Status, message: &str, clock: &str) -> String {
    format!("[{}] {} {}", clock, status.icon(), message)
}

/// Log text for a status line. Statuses without a matching tracing level
/// keep their name in front of the message.
pub fn log_message(status: Status, message: &str) -> String {
    match status {
        Status::Success | Status::Install => format!("{}: {}", status.as_str(), message),
        Status::Info | Status::Warning | Status::Error => message.to_string(),
    }
}

pub fn report(status: Status, message: impl AsRef<str>) {
    let message = message.as_ref();
    let clock = Local::now().format("%H:%M:%S").to_string();
    println!("{}", status.paint(&format_line(status, message, &clock)));

    let logged = log_message(status, message);
    match status {
        Status::Warning => tracing::warn!("{}", logged),
        Status::Error => tracing::error!("{}", logged),
        _ => tracing::info!("{}", logged),
    }
}

pub fn info(message: impl AsRef<str>) {
    report(Status::Info, message)
}

pub fn success(message: impl AsRef<str>) {
    report(Status::Success, message)
}

pub fn warning(message: impl AsRef<str>) {
    report(Status::Warning, message)
}

pub fn error(message: impl AsRef<str>) {
    report(Status::Error, message)
}

pub fn install(message: impl AsRef<str>) {
    report(Status::Install, message)
}
