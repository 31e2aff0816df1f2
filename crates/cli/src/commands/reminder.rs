//! Reminder commands.

use chrono::{DateTime, Utc};
use clap::{ArgGroup, Subcommand};
use trackflow_core::{EntityType, LeadId, NewReminder, OrderId, ReminderId, ReminderPatch};

use super::{Store, non_empty, parse_datetime};
use crate::error::CliError;
use crate::output::{self, Output};

#[derive(Subcommand)]
pub enum ReminderAction {
    /// Schedule a follow-up on a lead or an order
    #[command(group(ArgGroup::new("target").required(true).args(["lead", "order"])))]
    Add {
        #[arg(short, long)]
        title: String,

        /// When it is due (RFC 3339, `YYYY-MM-DD HH:MM` or YYYY-MM-DD; UTC)
        #[arg(short, long, value_parser = parse_datetime)]
        date: DateTime<Utc>,

        /// Attach to this lead
        #[arg(long)]
        lead: Option<LeadId>,

        /// Attach to this order
        #[arg(long)]
        order: Option<OrderId>,

        #[arg(long)]
        description: Option<String>,
    },
    /// List reminders
    List {
        /// Hide completed reminders
        #[arg(long)]
        pending: bool,

        /// Only open reminders due in the next 7 days
        #[arg(long, conflicts_with = "pending")]
        upcoming: bool,
    },
    /// Edit reminder fields
    Update {
        id: ReminderId,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long, value_parser = parse_datetime)]
        date: Option<DateTime<Utc>>,

        /// Description; an empty string clears it
        #[arg(long)]
        description: Option<String>,
    },
    /// Mark a reminder as done
    Complete { id: ReminderId },
    /// Mark a reminder as not done
    Reopen { id: ReminderId },
    /// Delete a reminder
    Delete { id: ReminderId },
}

/// Run a reminder command against the store.
pub fn run(store: &mut Store, action: ReminderAction, out: Output) -> Result<(), CliError> {
    match action {
        ReminderAction::Add {
            title,
            date,
            lead,
            order,
            description,
        } => {
            let (entity_type, entity_id) = resolve_target(store, lead, order)?;
            let reminder = store.add_reminder(NewReminder {
                description: description.and_then(non_empty),
                ..NewReminder::new(title, date, entity_type, entity_id)
            });
            out.emit(&reminder, || format!("created reminder {}", output::reminder_line(&reminder)))
        }
        ReminderAction::List { pending, upcoming } => {
            if upcoming {
                let due = store.dashboard_summary().upcoming_follow_ups;
                return out.emit(&due, || {
                    output::lines(&due, output::reminder_line, "nothing due in the next 7 days")
                });
            }
            let reminders: Vec<_> = store
                .reminders()
                .iter()
                .filter(|r| !pending || !r.completed)
                .collect();
            out.emit(&reminders, || {
                output::lines(&reminders, |r| output::reminder_line(r), "no reminders")
            })
        }
        ReminderAction::Update {
            id,
            title,
            date,
            description,
        } => {
            let patch = ReminderPatch {
                title,
                date,
                description: description.map(non_empty),
                ..ReminderPatch::default()
            };
            if patch == ReminderPatch::default() {
                return Err(CliError::EmptyUpdate);
            }
            let reminder = store
                .update_reminder(&id, patch)
                .ok_or_else(|| CliError::not_found("reminder", &id))?;
            out.emit(reminder, || format!("updated reminder {}", output::reminder_line(reminder)))
        }
        ReminderAction::Complete { id } => set_completed(store, &id, true, out),
        ReminderAction::Reopen { id } => set_completed(store, &id, false, out),
        ReminderAction::Delete { id } => {
            let removed = store.delete_reminder(&id);
            out.emit(&removed, || output::removed("reminder", id.as_str(), &removed))
        }
    }
}

fn set_completed(
    store: &mut Store,
    id: &ReminderId,
    completed: bool,
    out: Output,
) -> Result<(), CliError> {
    let reminder = store
        .set_reminder_completed(id, completed)
        .ok_or_else(|| CliError::not_found("reminder", id))?;
    out.emit(reminder, || output::reminder_line(reminder))
}

/// Check that the chosen lead or order exists and turn it into a target.
fn resolve_target(
    store: &Store,
    lead: Option<LeadId>,
    order: Option<OrderId>,
) -> Result<(EntityType, String), CliError> {
    match (lead, order) {
        (Some(id), _) => store
            .lead(&id)
            .map(|_| (EntityType::Lead, id.to_string()))
            .ok_or_else(|| CliError::not_found("lead", &id)),
        (None, Some(id)) => store
            .order(&id)
            .map(|_| (EntityType::Order, id.to_string()))
            .ok_or_else(|| CliError::not_found("order", &id)),
        (None, None) => Err(CliError::MissingTarget),
    }
}
