//! `AppError`, the single error type returned across the crate, and its `Result` alias.
//!
//! Foreign errors that are not `Clone` are held in an `Arc` so `AppError` stays `Clone`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Everything that can go wrong while applying or undoing tweaks.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// The tool only runs on Linux hosts.
    #[error("Unsupported platform: {0} (this tool only runs on Linux)")]
    UnsupportedPlatform(String),

    /// The detected distro maps to no supported package manager.
    #[error("Unknown package manager: {0}")]
    UnknownPackageManager(String),

    /// A shell command exceeded its wall-clock budget and was killed.
    #[error("Command timed out after {}s: {command}", .timeout.as_secs())]
    CommandTimeout { command: String, timeout: Duration },

    /// Failure while creating or restoring a backup.
    #[error("Backup Error ({}): {reason}", .path.display())]
    Backup { path: PathBuf, reason: String },

    /// `config.json` could not be read or written as JSON.
    #[error("Config JSON error: {0}")]
    JsonParse(Arc<serde_json::Error>),

    #[error("I/O error: {0}")]
    Io(Arc<std::io::Error>),

    /// Startup problems such as a missing home directory.
    #[error("CLI error: {0}")]
    Cli(String),

    /// A menu or confirmation prompt failed.
    #[error("Prompt error: {0}")]
    Dialoguer(Arc<dialoguer::Error>),

    #[error("Progress bar template error: {0}")]
    Template(Arc<indicatif::style::TemplateError>),
}

/// Shorthand for results carrying an [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn backup(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        AppError::Backup {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// True when the underlying I/O failure is a permission problem, meaning
    /// the operation may succeed when retried through `sudo`.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, AppError::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied)
    }
}

// Conversions used by `?`.

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(Arc::new(err))
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::Dialoguer(Arc::new(err))
    }
}

impl From<indicatif::style::TemplateError> for AppError {
    fn from(err: indicatif::style::TemplateError) -> Self {
        AppError::Template(Arc::new(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonParse(Arc::new(err))
    }
}
