//! Key-value slots backing the state store

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use fleet_types::StoreError;

/// A persistent key-value backend holding opaque string blobs
pub trait KeyValueSlot {
    /// Read the blob stored under `key`, `None` if nothing was ever written
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the blob stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the blob stored under `key`; missing keys are not an error
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// File-based slot: one `<key>.json` file per key inside a data directory
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    /// Open the slot directory, creating it if needed
    pub fn open(dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&dir)
            .map_err(|e| StoreError::DataDir(format!("{}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueSlot for FileSlot {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Read {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let write_err = |e: std::io::Error| StoreError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        };
        let file = File::create(self.path_for(key)).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(value.as_bytes()).map_err(write_err)?;
        writer.flush().map_err(write_err)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Write {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

/// In-process slot, nothing survives the process
#[derive(Default)]
pub struct MemorySlot {
    entries: RefCell<HashMap<String, String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueSlot for MemorySlot {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_slot_missing_key_is_none() {
        let dir = tempdir().unwrap();
        let slot = FileSlot::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(slot.get("absent").unwrap(), None);
    }

    #[test]
    fn test_file_slot_overwrites() {
        let dir = tempdir().unwrap();
        let slot = FileSlot::open(dir.path().join("nested")).unwrap();
        slot.set("state", "first").unwrap();
        slot.set("state", "second").unwrap();
        assert_eq!(slot.get("state").unwrap().as_deref(), Some("second"));
        assert!(slot.path_for("state").exists());
    }

    #[test]
    fn test_file_slot_remove_is_idempotent() {
        let dir = tempdir().unwrap();
        let slot = FileSlot::open(dir.path().to_path_buf()).unwrap();
        slot.set("state", "{}").unwrap();
        slot.remove("state").unwrap();
        slot.remove("state").unwrap();
        assert_eq!(slot.get("state").unwrap(), None);
    }

    #[test]
    fn test_memory_slot() {
        let slot = MemorySlot::new();
        slot.set("k", "v").unwrap();
        assert_eq!(slot.get("k").unwrap().as_deref(), Some("v"));
        slot.remove("k").unwrap();
        assert_eq!(slot.get("k").unwrap(), None);
    }
}
