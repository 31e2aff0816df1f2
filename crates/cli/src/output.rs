//! Rendering of command results as plain text or JSON.

#![allow(clippy::print_stdout)]

use std::fmt::Write as _;

use serde::Serialize;
use trackflow_core::{DashboardSummary, Lead, LeadStage, Order, OrderStage, Reminder, Removed};

use crate::error::CliError;

/// Where command results go.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub const fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print `value` as pretty JSON, or the text produced by `text`.
    pub fn emit<T: Serialize + ?Sized>(
        &self,
        value: &T,
        text: impl FnOnce() -> String,
    ) -> Result<(), CliError> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text().trim_end());
        }
        Ok(())
    }
}

pub fn lead_line(lead: &Lead) -> String {
    let mut line = format!("{}  [{}]  {}", lead.id, lead.stage, lead.name);
    if !lead.company.is_empty() {
        let _ = write!(line, " ({})", lead.company);
    }
    if let Some(date) = lead.follow_up_date {
        let _ = write!(line, "  follow-up {date}");
    }
    line
}

pub fn lead_detail(lead: &Lead, orders: &[&Order], reminders: &[&Reminder]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", lead.name);
    let _ = writeln!(out, "  id:               {}", lead.id);
    let _ = writeln!(out, "  stage:            {}", lead.stage);
    let _ = writeln!(out, "  contact:          {}", lead.contact);
    let _ = writeln!(out, "  company:          {}", lead.company);
    let _ = writeln!(out, "  product interest: {}", lead.product_interest);
    if let Some(date) = lead.follow_up_date {
        let _ = writeln!(out, "  follow-up:        {date}");
    }
    if let Some(notes) = &lead.notes {
        let _ = writeln!(out, "  notes:            {notes}");
    }
    let _ = writeln!(out, "  created:          {}", lead.created_at.to_rfc3339());
    let _ = writeln!(out, "  updated:          {}", lead.updated_at.to_rfc3339());
    append_related(&mut out, orders, reminders);
    out
}

pub fn order_line(order: &Order) -> String {
    let mut line = format!("{}  [{}]  {}", order.id, order.stage, order.lead_name);
    if let Some(courier) = &order.courier {
        let _ = write!(line, "  via {courier}");
    }
    if let Some(tracking) = &order.tracking_number {
        let _ = write!(line, " #{tracking}");
    }
    line
}

pub fn order_detail(order: &Order, reminders: &[&Reminder]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Order for {}", order.lead_name);
    let _ = writeln!(out, "  id:        {}", order.id);
    let _ = writeln!(out, "  lead:      {}", order.lead_id);
    let _ = writeln!(out, "  stage:     {}", order.stage);
    if let Some(details) = &order.details {
        let _ = writeln!(out, "  details:   {details}");
    }
    if let Some(courier) = &order.courier {
        let _ = writeln!(out, "  courier:   {courier}");
    }
    if let Some(tracking) = &order.tracking_number {
        let _ = writeln!(out, "  tracking:  {tracking}");
    }
    let _ = writeln!(out, "  created:   {}", order.created_at.to_rfc3339());
    let _ = writeln!(out, "  updated:   {}", order.updated_at.to_rfc3339());
    append_related(&mut out, &[], reminders);
    out
}

pub fn reminder_line(reminder: &Reminder) -> String {
    let check = if reminder.completed { "x" } else { " " };
    format!(
        "{}  [{check}] {}  {}  ({} {})",
        reminder.id,
        reminder.date.format("%Y-%m-%d %H:%M"),
        reminder.title,
        reminder.entity_type,
        reminder.entity_id
    )
}

fn append_related(out: &mut String, orders: &[&Order], reminders: &[&Reminder]) {
    if !orders.is_empty() {
        let _ = writeln!(out, "  orders:");
        for order in orders {
            let _ = writeln!(out, "    {}", order_line(order));
        }
    }
    if !reminders.is_empty() {
        let _ = writeln!(out, "  reminders:");
        for reminder in reminders {
            let _ = writeln!(out, "    {}", reminder_line(reminder));
        }
    }
}

pub fn lines<T>(items: &[T], line: impl Fn(&T) -> String, empty: &str) -> String {
    if items.is_empty() {
        return empty.to_owned();
    }
    items.iter().map(line).collect::<Vec<_>>().join("\n")
}

pub fn lead_board(columns: &[(LeadStage, Vec<&Lead>)]) -> String {
    let mut out = String::new();
    for (stage, leads) in columns {
        let _ = writeln!(out, "== {stage} ({})", leads.len());
        for lead in leads {
            let _ = writeln!(out, "   {}", lead_line(lead));
        }
    }
    out
}

pub fn order_board(columns: &[(OrderStage, Vec<&Order>)]) -> String {
    let mut out = String::new();
    for (stage, orders) in columns {
        let _ = writeln!(out, "== {stage} ({})", orders.len());
        for order in orders {
            let _ = writeln!(out, "   {}", order_line(order));
        }
    }
    out
}

pub fn dashboard(summary: &DashboardSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Leads");
    let _ = writeln!(out, "  total:            {}", summary.total_leads);
    let _ = writeln!(out, "  open:             {}", summary.open_leads);
    let _ = writeln!(out, "  won:              {}", summary.won_leads);
    let _ = writeln!(out, "  conversion rate:  {:.1}%", summary.conversion_rate);
    let _ = writeln!(out, "Orders");
    for stage in OrderStage::ALL {
        let _ = writeln!(out, "  {:<18}{}", format!("{stage}:"), summary.orders_in(stage));
    }
    let _ = writeln!(out, "Upcoming follow-ups (next 7 days)");
    if summary.upcoming_follow_ups.is_empty() {
        let _ = writeln!(out, "  none");
    }
    for reminder in &summary.upcoming_follow_ups {
        let _ = writeln!(out, "  {}", reminder_line(reminder));
    }
    out
}

pub fn removed(kind: &str, id: &str, removed: &Removed) -> String {
    if removed.is_empty() {
        return format!("no {kind} with id {id}; nothing deleted");
    }
    format!(
        "deleted {} lead(s), {} order(s), {} reminder(s)",
        removed.leads, removed.orders, removed.reminders
    )
}
