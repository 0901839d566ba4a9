//! Provides on-disk persistence: path layout, the JSON state file, and backups.

mod backup;
mod config_store;
mod paths;

pub use backup::*;
pub use config_store::*;
pub use paths::*;
