//! TrackFlow Core - Domain store for a single-user CRM.
//!
//! This crate holds everything the TrackFlow front-ends share:
//! - sales leads moving through a qualification pipeline
//! - fulfillment orders created when a lead is won
//! - follow-up reminders attached to a lead or an order
//!
//! # Architecture
//!
//! [`DomainStore`] owns the three collections and is the only writer to
//! their durable slots. It is generic over a [`Storage`] backend
//! ([`MemoryStorage`] for tests, [`FileStorage`] for the CLI) and a
//! [`Clock`], so it can be constructed and exercised in isolation.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and pipeline stage enums
//! - [`models`] - Lead, order and reminder records plus create/patch inputs
//! - [`store`] - The domain store: CRUD, cascades, stage transitions
//! - [`dashboard`] - Aggregated pipeline summary
//! - [`storage`] - Key-value slot backends
//! - [`transfer`] - Export/import bundle
//! - [`clock`] - Time sources

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod clock;
pub mod dashboard;
pub mod models;
pub mod storage;
pub mod store;
pub mod transfer;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use dashboard::{DashboardSummary, FOLLOW_UP_WINDOW};
pub use models::*;
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::{DomainStore, Removed};
pub use transfer::{ExportBundle, TransferError};
pub use types::*;
