//! Order commands: the list, board and detail views of fulfillment.

use clap::Subcommand;
use trackflow_core::{EntityType, LeadId, NewOrder, OrderId, OrderPatch, OrderStage};

use super::{Store, non_empty};
use crate::error::CliError;
use crate::output::{self, Output};

#[derive(Subcommand)]
pub enum OrderAction {
    /// Create an order for an existing lead
    Add {
        /// Lead the order fulfills
        #[arg(short, long)]
        lead: LeadId,

        #[arg(short, long, default_value = "Order Received")]
        stage: OrderStage,

        #[arg(short, long)]
        details: Option<String>,

        #[arg(long)]
        courier: Option<String>,

        #[arg(long)]
        tracking_number: Option<String>,
    },
    /// List orders
    List {
        /// Only show orders in this stage
        #[arg(short, long)]
        stage: Option<OrderStage>,

        /// Only show orders for this lead
        #[arg(short, long)]
        lead: Option<LeadId>,
    },
    /// Show one order with its reminders
    Show { id: OrderId },
    /// Edit order fields; an empty string clears a field
    Update {
        id: OrderId,

        #[arg(short, long)]
        details: Option<String>,

        #[arg(long)]
        courier: Option<String>,

        #[arg(long)]
        tracking_number: Option<String>,
    },
    /// Move an order to another stage
    Stage { id: OrderId, stage: OrderStage },
    /// Delete an order and its reminders
    Delete { id: OrderId },
    /// Show orders grouped by stage
    Board,
}

/// Run an order command against the store.
pub fn run(store: &mut Store, action: OrderAction, out: Output) -> Result<(), CliError> {
    match action {
        OrderAction::Add {
            lead,
            stage,
            details,
            courier,
            tracking_number,
        } => {
            let source = store
                .lead(&lead)
                .ok_or_else(|| CliError::not_found("lead", &lead))?;
            let new = NewOrder {
                stage,
                details: details.and_then(non_empty),
                courier: courier.and_then(non_empty),
                tracking_number: tracking_number.and_then(non_empty),
                ..NewOrder::for_lead(source)
            };
            let order = store.add_order(new);
            out.emit(&order, || format!("created order {}", output::order_line(&order)))
        }
        OrderAction::List { stage, lead } => {
            let orders: Vec<_> = store
                .orders()
                .iter()
                .filter(|o| stage.is_none_or(|s| o.stage == s))
                .filter(|o| lead.as_ref().is_none_or(|id| &o.lead_id == id))
                .collect();
            out.emit(&orders, || output::lines(&orders, |o| output::order_line(o), "no orders"))
        }
        OrderAction::Show { id } => {
            let order = store.order(&id).ok_or_else(|| CliError::not_found("order", &id))?;
            let reminders: Vec<_> = store.reminders_for(EntityType::Order, id.as_str()).collect();
            out.emit(order, || output::order_detail(order, &reminders))
        }
        OrderAction::Update {
            id,
            details,
            courier,
            tracking_number,
        } => {
            let patch = OrderPatch {
                details: details.map(non_empty),
                courier: courier.map(non_empty),
                tracking_number: tracking_number.map(non_empty),
                ..OrderPatch::default()
            };
            if patch == OrderPatch::default() {
                return Err(CliError::EmptyUpdate);
            }
            let order = store
                .update_order(&id, patch)
                .ok_or_else(|| CliError::not_found("order", &id))?;
            out.emit(order, || format!("updated order {}", output::order_line(order)))
        }
        OrderAction::Stage { id, stage } => {
            let order = store
                .update_order_stage(&id, stage)
                .ok_or_else(|| CliError::not_found("order", &id))?;
            out.emit(order, || format!("moved order {}", output::order_line(order)))
        }
        OrderAction::Delete { id } => {
            let removed = store.delete_order(&id);
            out.emit(&removed, || output::removed("order", id.as_str(), &removed))
        }
        OrderAction::Board => {
            let columns = store.orders_by_stage();
            let json: Vec<_> = columns
                .iter()
                .map(|(stage, orders)| serde_json::json!({ "stage": stage, "orders": orders }))
                .collect();
            out.emit(&json, || output::order_board(&columns))
        }
    }
}
