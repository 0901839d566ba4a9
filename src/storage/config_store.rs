//! Loads and saves the persisted [`TweakState`] as pretty-printed JSON.

use crate::error::Result;
use crate::models::{timestamp, TweakState};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the state file, merging it over defaults.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// `AppError::Io` when the file cannot be read, `AppError::JsonParse`
    /// when it is not a valid state document.
    pub fn try_load(&self) -> Result<Option<TweakState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let state = serde_json::from_str(&raw)?;
        Ok(Some(state))
    }

    /// Best-effort load: a missing or broken file yields the defaults.
    pub fn load(&self) -> TweakState {
        match self.try_load() {
            Ok(Some(state)) => {
                debug!("Loaded state from {}", self.path.display());
                state
            },
            Ok(None) => TweakState::default(),
            Err(e) => {
                warn!(
                    "Ignoring unreadable state file {}: {}",
                    self.path.display(),
                    e
                );
                TweakState::default()
            },
        }
    }

    /// Stamps `last_run` and rewrites the whole file.
    pub fn save(&self, state: &mut TweakState) -> Result<()> {
        state.last_run = Some(timestamp());
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json)?;
        debug!("Saved state to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FULL_OPTIMIZATION;
    use crate::test_support::ScratchDir;
    use serde_json::json;

    #[test]
    fn state_round_trips_through_save_and_load() {
        let scratch = ScratchDir::new("store");
        let store = ConfigStore::new(scratch.join("config.json"));

        let mut state = TweakState::default();
        state.gamemode_enabled = true;
        state.mark_installed(&["steam", "lutris"]);
        state.record_optimization(FULL_OPTIMIZATION);
        state.extra.insert("theme".to_string(), json!("dark"));
        store.save(&mut state).unwrap();

        let loaded = store.try_load().unwrap().unwrap();
        assert_eq!(loaded, state);
        assert!(loaded.last_run.is_some());
    }

    #[test]
    fn saved_file_is_indented_json() {
        let scratch = ScratchDir::new("store");
        let store = ConfigStore::new(scratch.join("config.json"));
        store.save(&mut TweakState::default()).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\n  \"optimizations\": []"));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let scratch = ScratchDir::new("store");
        let store = ConfigStore::new(scratch.join("absent.json"));
        assert!(store.try_load().unwrap().is_none());
        assert_eq!(store.load(), TweakState::default());
    }

    #[test]
    fn malformed_file_loads_defaults() {
        let scratch = ScratchDir::new("store");
        let path = scratch.join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let store = ConfigStore::new(&path);
        assert!(store.try_load().is_err());
        assert_eq!(store.load(), TweakState::default());
    }
}
