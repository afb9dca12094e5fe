//! Persistent store for the fleet register state
//!
//! The whole `AppState` lives in a single key-value slot as one JSON blob.
//! Writes are unconditional overwrites; the last writer wins.

pub mod seed;
pub mod slot;

pub use seed::seed_state;
pub use slot::{FileSlot, KeyValueSlot, MemorySlot};

use std::path::PathBuf;

use fleet_types::{AppState, Result};
use tracing::{debug, warn};

/// Slot key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "fleet_register_state";

/// Loads and saves the application state through a key-value slot
pub struct Store<S: KeyValueSlot = FileSlot> {
    slot: S,
    key: String,
}

impl Store<FileSlot> {
    /// Open a file-backed store in `data_dir` using the default key
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        Self::open_with_key(data_dir, DEFAULT_STORAGE_KEY)
    }

    /// Open a file-backed store in `data_dir` under a custom key
    pub fn open_with_key(data_dir: PathBuf, key: &str) -> Result<Self> {
        let slot = FileSlot::open(data_dir)?;
        Ok(Self::with_slot(slot, key))
    }

    /// Path of the JSON file holding the state
    pub fn state_path(&self) -> PathBuf {
        self.slot.path_for(&self.key)
    }
}

impl Store<MemorySlot> {
    /// Store that keeps everything in memory
    pub fn in_memory() -> Self {
        Self::with_slot(MemorySlot::new(), DEFAULT_STORAGE_KEY)
    }
}

impl<S: KeyValueSlot> Store<S> {
    pub fn with_slot(slot: S, key: &str) -> Self {
        Self {
            slot,
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the persisted state.
    ///
    /// Falls back to the seed dataset when nothing is stored, the slot
    /// cannot be read, or the blob does not parse.
    pub fn load(&self) -> AppState {
        let blob = match self.slot.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                debug!(key = %self.key, "no saved state, using seed data");
                return seed_state();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "state unreadable, using seed data");
                return seed_state();
            }
        };

        match serde_json::from_str::<AppState>(&blob) {
            Ok(state) => {
                debug!(
                    key = %self.key,
                    vehicles = state.vehicles.len(),
                    parts = state.parts.len(),
                    "loaded state"
                );
                state
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "saved state is corrupt, using seed data");
                seed_state()
            }
        }
    }

    /// Serialize and overwrite the persisted state
    pub fn save(&self, state: &AppState) -> Result<()> {
        let blob = serde_json::to_string_pretty(state)?;
        self.slot.set(&self.key, &blob)?;
        debug!(
            key = %self.key,
            vehicles = state.vehicles.len(),
            parts = state.parts.len(),
            "saved state"
        );
        Ok(())
    }

    /// Drop the persisted state so the next load returns seed data
    pub fn reset(&self) -> Result<()> {
        self.slot.remove(&self.key)?;
        debug!(key = %self.key, "cleared saved state");
        Ok(())
    }

    /// Whether a blob exists under the key
    pub fn has_saved_state(&self) -> bool {
        matches!(self.slot.get(&self.key), Ok(Some(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_load_without_data_is_seed() {
        let store = Store::in_memory();
        assert!(!store.has_saved_state());
        assert_eq!(store.load(), seed_state());
    }

    #[test]
    fn test_in_memory_round_trip() {
        let store = Store::in_memory();
        let mut state = seed_state();
        state.parts.clear();
        store.save(&state).unwrap();
        assert!(store.has_saved_state());
        assert_eq!(store.load(), state);
    }

    #[test]
    fn test_corrupt_blob_falls_back_to_seed() {
        let slot = MemorySlot::new();
        slot.set(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        let store = Store::with_slot(slot, DEFAULT_STORAGE_KEY);
        assert_eq!(store.load(), seed_state());
    }

    #[test]
    fn test_reset_restores_seed() {
        let store = Store::in_memory();
        store.save(&AppState::default()).unwrap();
        assert_eq!(store.load(), AppState::default());
        store.reset().unwrap();
        assert_eq!(store.load(), seed_state());
    }
}
