//! Provides access to the host: command execution and read-only probes.
//!
//! Includes:
//! - `shell`: the `ShellRunner` seam and its `sh -c` implementation.
//! - `probe`: filesystem, GPU and hardware detection.

#[cfg(test)]
mod mock;
mod probe;
mod shell;

#[cfg(test)]
pub use mock::*;
pub use probe::*;
pub use shell::*;
