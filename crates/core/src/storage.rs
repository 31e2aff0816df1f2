//! Durable key-value slots backing the store.
//!
//! Each collection lives in its own slot, holding the whole collection as a
//! JSON array. Backends only move opaque strings; parsing is the store's job.

use std::collections::HashMap;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Slot holding the lead collection.
pub const LEADS_SLOT: &str = "trackflow_leads";
/// Slot holding the order collection.
pub const ORDERS_SLOT: &str = "trackflow_orders";
/// Slot holding the reminder collection.
pub const REMINDERS_SLOT: &str = "trackflow_reminders";

/// All slots owned by the store, in load order.
pub const ALL_SLOTS: [&str; 3] = [LEADS_SLOT, ORDERS_SLOT, REMINDERS_SLOT];

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading a slot failed for a reason other than it being absent.
    #[error("failed to read slot `{key}`: {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },
    /// Writing or removing a slot failed.
    #[error("failed to write slot `{key}`: {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },
}

/// A string-valued key-value store with independent slots.
pub trait Storage {
    /// Read a slot. `Ok(None)` means the slot is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the contents of a slot.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the backend rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a slot. Removing an absent slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the backend rejects the removal.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage; contents vanish with the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    /// An empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a slot, e.g. with a fixture.
    #[must_use]
    pub fn with_slot(mut self, key: &str, value: impl Into<String>) -> Self {
        self.slots.insert(key.to_owned(), value.into());
        self
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.slots.remove(key);
        Ok(())
    }
}

/// One file per slot under a directory: `<dir>/<key>.json`.
///
/// Writes land in a temporary sibling file first and are then renamed over
/// the slot file, so a crash mid-write leaves the previous contents intact.
/// A failed write removes its temporary file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding the slot files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    #[must_use]
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.slot_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            key: key.to_owned(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(write_err)?;

        let path = self.slot_path(key);
        let mut temp = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        temp.write_all(value.as_bytes()).map_err(write_err)?;
        temp.persist(&path).map_err(|e| write_err(e.error))?;

        tracing::debug!(slot = key, path = %path.display(), bytes = value.len(), "slot written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.slot_path(key)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Write {
                key: key.to_owned(),
                source,
            }),
        }
    }
}
