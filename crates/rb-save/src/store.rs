//! Raw slot storage.
//!
//! Stores move text in and out of slots and know nothing about versions;
//! the gate lives in [`crate::SaveManager`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::SaveResult;
use crate::slot::SlotId;

/// Backing storage for save slots.
pub trait SlotStore {
    /// Read a slot. `Ok(None)` when the slot is empty.
    fn read(&self, slot: SlotId) -> SaveResult<Option<String>>;

    /// Overwrite a slot.
    fn write(&mut self, slot: SlotId, contents: &str) -> SaveResult<()>;

    /// Clear a slot. Returns whether anything was removed.
    fn remove(&mut self, slot: SlotId) -> SaveResult<bool>;

    /// Occupied slots in order.
    fn list(&self) -> SaveResult<Vec<SlotId>>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: BTreeMap<SlotId, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStore for MemoryStore {
    fn read(&self, slot: SlotId) -> SaveResult<Option<String>> {
        Ok(self.slots.get(&slot).cloned())
    }

    fn write(&mut self, slot: SlotId, contents: &str) -> SaveResult<()> {
        self.slots.insert(slot, contents.to_string());
        Ok(())
    }

    fn remove(&mut self, slot: SlotId) -> SaveResult<bool> {
        Ok(self.slots.remove(&slot).is_some())
    }

    fn list(&self) -> SaveResult<Vec<SlotId>> {
        Ok(self.slots.keys().copied().collect())
    }
}

/// A directory of `auto.json` / `slot-<n>.json` files. The directory is
/// created on the first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` as the save directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The save directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of a slot file.
    pub fn path(&self, slot: SlotId) -> PathBuf {
        self.dir.join(slot.file_name())
    }
}

impl SlotStore for FileStore {
    fn read(&self, slot: SlotId) -> SaveResult<Option<String>> {
        let path = self.path(slot);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, slot: SlotId, contents: &str) -> SaveResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(slot), contents)?;
        Ok(())
    }

    fn remove(&mut self, slot: SlotId) -> SaveResult<bool> {
        match std::fs::remove_file(self.path(slot)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> SaveResult<Vec<SlotId>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut slots = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(slot) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(SlotId::from_key)
            {
                slots.push(slot);
            }
        }
        slots.sort();
        Ok(slots)
    }
}
