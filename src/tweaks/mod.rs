//! The fixed tweak catalog: package lists, configuration file templates, and
//! the shell command tables selected by package manager, filesystem, or desktop.
//!
//! Nothing here touches the system; the `cli` layer executes what these
//! functions return through a [`crate::system::ShellRunner`].

mod commands;
mod packages;
mod templates;

pub use commands::*;
pub use packages::*;
pub use templates::*;

use std::path::Path;

/// A single shell line from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweakCommand {
    pub line: String,
    /// Run through `sudo` when sudo is available.
    pub privileged: bool,
}

impl TweakCommand {
    pub fn user(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            privileged: false,
        }
    }

    pub fn root(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            privileged: true,
        }
    }
}

/// Quotes a path for interpolation into an `sh -c` line.
pub fn shell_quote(path: &Path) -> String {
    let raw = path.to_string_lossy();
    if !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+:@%".contains(c))
    {
        return raw.into_owned();
    }
    format!("'{}'", raw.replace('\'', r"'\''"))
}
