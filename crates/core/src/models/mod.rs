//! Persisted entity records and their creation/patch inputs.
//!
//! Field names serialize in camelCase, matching the record layout of the
//! durable slots.

pub mod lead;
pub mod order;
pub mod reminder;

pub use lead::{Lead, LeadPatch, NewLead};
pub use order::{NewOrder, Order, OrderPatch};
pub use reminder::{NewReminder, Reminder, ReminderPatch, parse_reminder_date};
