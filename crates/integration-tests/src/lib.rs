//! Integration tests for TrackFlow.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p trackflow-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `pipeline` - Lead to order lifecycle, cascades, dashboard
//! - `persistence` - File-backed slots: reopen, corruption, export/import, clear
//!
//! Every test runs against [`FileStorage`] in its own temporary directory.

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;
use trackflow_core::{DomainStore, FileStorage, ManualClock};

/// A file-backed store with a fixed clock, plus the directory keeping it alive.
pub struct TestContext {
    pub dir: TempDir,
    pub store: DomainStore<FileStorage, ManualClock>,
}

impl TestContext {
    /// Fresh store in a new temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tmpdir");
        let store = open_store(&dir);
        Self { dir, store }
    }

    /// Open a second, independent store over the same directory.
    #[must_use]
    pub fn reopen(&self) -> DomainStore<FileStorage, ManualClock> {
        open_store(&self.dir)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// The instant every test clock starts at.
///
/// # Panics
///
/// Never; the constant date is valid.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
}

fn open_store(dir: &TempDir) -> DomainStore<FileStorage, ManualClock> {
    DomainStore::with_clock(FileStorage::new(dir.path()), ManualClock::new(epoch()))
}
