//! Persisted tweak state (`config.json`).
//!
//! The struct is deserialized with container-level defaults so that a partial
//! file is merged over the built-in defaults. Keys this version does not know
//! about are kept in `extra` and written back unchanged.

use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record type written after a full optimization pass.
pub const FULL_OPTIMIZATION: &str = "full_optimization";

/// Timestamp format used for `last_run` and optimization records.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time formatted as `YYYY-MM-DD HH:MM:SS`.
pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// One completed optimization run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationRecord {
    #[serde(default)]
    pub time: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    "optimization".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweakState {
    pub optimizations: Vec<OptimizationRecord>,
    pub installed_packages: Vec<String>,
    pub last_run: Option<String>,
    pub gamemode_enabled: bool,
    pub wine_optimized: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TweakState {
    /// Appends an optimization record stamped with the current time.
    pub fn record_optimization(&mut self, kind: &str) {
        self.optimizations.push(OptimizationRecord {
            time: timestamp(),
            kind: kind.to_string(),
        });
    }

    /// Returns the packages from `candidates` not yet recorded as installed,
    /// preserving order.
    pub fn pending_packages<'a>(&self, candidates: &[&'a str]) -> Vec<&'a str> {
        candidates
            .iter()
            .copied()
            .filter(|pkg| !self.installed_packages.iter().any(|p| p == pkg))
            .collect()
    }

    pub fn mark_installed(&mut self, packages: &[&str]) {
        self.installed_packages
            .extend(packages.iter().map(|p| p.to_string()));
    }

    /// The last `n` optimization records, oldest first.
    pub fn recent_optimizations(&self, n: usize) -> &[OptimizationRecord] {
        let start = self.optimizations.len().saturating_sub(n);
        &self.optimizations[start..]
    }

    /// Defaults with `last_run` stamped, as written after a settings reset.
    pub fn reset() -> Self {
        Self {
            last_run: Some(timestamp()),
            ..Self::default()
        }
    }
}
