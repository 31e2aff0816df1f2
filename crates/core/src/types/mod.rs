//! Core types for TrackFlow.
//!
//! This module provides type-safe wrappers for IDs and pipeline stages.

pub mod id;
pub mod stage;

pub use id::*;
pub use stage::{EntityType, LeadStage, OrderStage, StageParseError};
