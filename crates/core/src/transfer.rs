//! Export bundle: the three raw slots gathered into one downloadable
//! document, and the inverse used to restore it.
//!
//! Slot contents are carried verbatim as strings. Nothing is re-parsed on
//! export, so a corrupt slot is exported as-is and will load as empty after
//! an import, exactly as it would have on startup.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::storage::{LEADS_SLOT, ORDERS_SLOT, REMINDERS_SLOT, Storage, StorageError};

/// Errors raised while exporting or importing a bundle.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// The bundle document is not valid JSON of the expected shape.
    #[error("invalid export bundle: {0}")]
    Format(#[from] serde_json::Error),
    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Raw slot contents, keyed by collection. `None` marks an absent slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportBundle {
    pub leads: Option<String>,
    pub orders: Option<String>,
    pub reminders: Option<String>,
}

impl ExportBundle {
    /// Read every slot from `storage` without interpreting it.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Storage`] if a slot cannot be read.
    pub fn read_from<S: Storage + ?Sized>(storage: &S) -> Result<Self, TransferError> {
        Ok(Self {
            leads: storage.get(LEADS_SLOT)?,
            orders: storage.get(ORDERS_SLOT)?,
            reminders: storage.get(REMINDERS_SLOT)?,
        })
    }

    /// Write every slot to `storage`; absent entries remove the slot.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Storage`] on the first failed write.
    pub fn write_to<S: Storage + ?Sized>(&self, storage: &mut S) -> Result<(), TransferError> {
        for (key, value) in self.slots() {
            match value {
                Some(raw) => storage.set(key, raw)?,
                None => storage.remove(key)?,
            }
        }
        Ok(())
    }

    /// Pretty-printed JSON document for download.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Format`] if serialization fails.
    pub fn to_json(&self) -> Result<String, TransferError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a previously exported document.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Format`] if `raw` is not a bundle.
    pub fn from_json(raw: &str) -> Result<Self, TransferError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Download file name for an export taken on `date`.
    #[must_use]
    pub fn file_name(date: NaiveDate) -> String {
        format!("trackflow-export-{}.json", date.format("%Y-%m-%d"))
    }

    fn slots(&self) -> [(&'static str, Option<&str>); 3] {
        [
            (LEADS_SLOT, self.leads.as_deref()),
            (ORDERS_SLOT, self.orders.as_deref()),
            (REMINDERS_SLOT, self.reminders.as_deref()),
        ]
    }
}
