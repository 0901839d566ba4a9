//! The command-line surface of the tool.
//!
//! Includes the argument parser and action handlers (`commands`), the
//! interactive menu and prompts (`menu`), status output (`report`), and
//! table rendering for the system report (`render`).

mod commands;
pub mod menu;
pub mod render;
pub mod report;

pub use commands::*;
