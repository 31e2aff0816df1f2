//! Lead commands: the list, board and detail views of the lead pipeline.
//!
//! # Usage
//!
//! ```bash
//! trackflow lead add -n "Acme" --company "Acme Corp" --contact jane@acme.example
//! trackflow lead stage <ID> won
//! trackflow lead board
//! ```

use chrono::NaiveDate;
use clap::Subcommand;
use trackflow_core::{EntityType, LeadId, LeadPatch, LeadStage, NewLead};

use super::{Store, non_empty, parse_date};
use crate::error::CliError;
use crate::output::{self, Output};

#[derive(Subcommand)]
pub enum LeadAction {
    /// Create a new lead
    Add {
        /// Lead display name
        #[arg(short, long)]
        name: String,

        /// Contact details (email, phone, person)
        #[arg(short, long, default_value = "")]
        contact: String,

        /// Company name
        #[arg(long, default_value = "")]
        company: String,

        /// Product the lead is interested in
        #[arg(short, long, default_value = "")]
        product_interest: String,

        /// Initial pipeline stage
        #[arg(short, long, default_value = "New")]
        stage: LeadStage,

        /// Follow-up date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        follow_up: Option<NaiveDate>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List leads
    List {
        /// Only show leads in this stage
        #[arg(short, long)]
        stage: Option<LeadStage>,

        /// Only show open leads (not won or lost)
        #[arg(long, conflicts_with = "stage")]
        open: bool,
    },
    /// Show one lead with its orders and reminders
    Show { id: LeadId },
    /// Edit lead fields
    Update {
        id: LeadId,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        contact: Option<String>,

        #[arg(long)]
        company: Option<String>,

        #[arg(short, long)]
        product_interest: Option<String>,

        /// Follow-up date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date, conflicts_with = "clear_follow_up")]
        follow_up: Option<NaiveDate>,

        /// Remove the follow-up date
        #[arg(long)]
        clear_follow_up: bool,

        /// Notes; an empty string clears them
        #[arg(long)]
        notes: Option<String>,
    },
    /// Move a lead to another stage (winning creates an order)
    Stage { id: LeadId, stage: LeadStage },
    /// Delete a lead with its orders and reminders
    Delete { id: LeadId },
    /// Show leads grouped by stage
    Board,
}

/// Run a lead command against the store.
pub fn run(store: &mut Store, action: LeadAction, out: Output) -> Result<(), CliError> {
    match action {
        LeadAction::Add {
            name,
            contact,
            company,
            product_interest,
            stage,
            follow_up,
            notes,
        } => {
            let lead = store.add_lead(NewLead {
                name,
                contact,
                company,
                product_interest,
                stage,
                follow_up_date: follow_up,
                notes: notes.and_then(non_empty),
            });
            out.emit(&lead, || format!("created lead {}", output::lead_line(&lead)))
        }
        LeadAction::List { stage, open } => {
            let leads: Vec<_> = store
                .leads()
                .iter()
                .filter(|l| stage.is_none_or(|s| l.stage == s))
                .filter(|l| !open || l.stage.is_open())
                .collect();
            out.emit(&leads, || output::lines(&leads, |l| output::lead_line(l), "no leads"))
        }
        LeadAction::Show { id } => {
            let lead = store.lead(&id).ok_or_else(|| CliError::not_found("lead", &id))?;
            let orders: Vec<_> = store.orders_for_lead(&id).collect();
            let reminders: Vec<_> = store.reminders_for(EntityType::Lead, id.as_str()).collect();
            out.emit(lead, || output::lead_detail(lead, &orders, &reminders))
        }
        LeadAction::Update {
            id,
            name,
            contact,
            company,
            product_interest,
            follow_up,
            clear_follow_up,
            notes,
        } => {
            let patch = LeadPatch {
                name,
                contact,
                company,
                product_interest,
                stage: None,
                follow_up_date: if clear_follow_up {
                    Some(None)
                } else {
                    follow_up.map(Some)
                },
                notes: notes.map(non_empty),
            };
            if patch.is_empty() {
                return Err(CliError::EmptyUpdate);
            }
            let lead = store
                .update_lead(&id, patch)
                .ok_or_else(|| CliError::not_found("lead", &id))?;
            out.emit(lead, || format!("updated lead {}", output::lead_line(lead)))
        }
        LeadAction::Stage { id, stage } => {
            let created = store.update_lead_stage(&id, stage);
            let lead = store.lead(&id).ok_or_else(|| CliError::not_found("lead", &id))?;
            let text = || {
                let mut text = format!("moved lead {}", output::lead_line(lead));
                if let Some(order) = &created {
                    text.push_str(&format!("\ncreated order {}", output::order_line(order)));
                }
                text
            };
            out.emit(
                &serde_json::json!({ "lead": lead, "createdOrder": created }),
                text,
            )
        }
        LeadAction::Delete { id } => {
            let removed = store.delete_lead(&id);
            out.emit(&removed, || output::removed("lead", id.as_str(), &removed))
        }
        LeadAction::Board => {
            let columns = store.leads_by_stage();
            let json: Vec<_> = columns
                .iter()
                .map(|(stage, leads)| serde_json::json!({ "stage": stage, "leads": leads }))
                .collect();
            out.emit(&json, || output::lead_board(&columns))
        }
    }
}
