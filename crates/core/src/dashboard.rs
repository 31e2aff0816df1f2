//! Dashboard summary: lead funnel counts, order stage counts and the
//! reminders coming due this week.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::{Lead, Order, Reminder};
use crate::types::{LeadStage, OrderStage};

/// How far ahead `upcoming_follow_ups` looks.
pub const FOLLOW_UP_WINDOW: Duration = Duration::days(7);

/// A computed, non-persisted snapshot of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_leads: usize,
    /// Leads that are neither won nor lost.
    pub open_leads: usize,
    pub won_leads: usize,
    /// `won_leads / total_leads * 100`, or `0` with no leads.
    pub conversion_rate: f64,
    pub orders_received: usize,
    pub orders_in_development: usize,
    pub orders_ready_to_dispatch: usize,
    pub orders_dispatched: usize,
    /// Open reminders dated within `[now, now + 7 days]`, in collection order.
    pub upcoming_follow_ups: Vec<Reminder>,
}

impl DashboardSummary {
    /// Aggregate the given collections as of `now`.
    #[must_use]
    pub fn compute(
        leads: &[Lead],
        orders: &[Order],
        reminders: &[Reminder],
        now: DateTime<Utc>,
    ) -> Self {
        let total_leads = leads.len();
        let open_leads = leads.iter().filter(|l| l.stage.is_open()).count();
        let won_leads = leads.iter().filter(|l| l.stage == LeadStage::Won).count();

        #[allow(clippy::cast_precision_loss)]
        let conversion_rate = if total_leads > 0 {
            won_leads as f64 / total_leads as f64 * 100.0
        } else {
            0.0
        };

        let count_orders =
            |stage: OrderStage| orders.iter().filter(|o| o.stage == stage).count();

        let window_end = now + FOLLOW_UP_WINDOW;
        let upcoming_follow_ups = reminders
            .iter()
            .filter(|r| !r.completed && r.date >= now && r.date <= window_end)
            .cloned()
            .collect();

        Self {
            total_leads,
            open_leads,
            won_leads,
            conversion_rate,
            orders_received: count_orders(OrderStage::OrderReceived),
            orders_in_development: count_orders(OrderStage::InDevelopment),
            orders_ready_to_dispatch: count_orders(OrderStage::ReadyToDispatch),
            orders_dispatched: count_orders(OrderStage::Dispatched),
            upcoming_follow_ups,
        }
    }

    /// Number of orders currently in `stage`.
    #[must_use]
    pub const fn orders_in(&self, stage: OrderStage) -> usize {
        match stage {
            OrderStage::OrderReceived => self.orders_received,
            OrderStage::InDevelopment => self.orders_in_development,
            OrderStage::ReadyToDispatch => self.orders_ready_to_dispatch,
            OrderStage::Dispatched => self.orders_dispatched,
        }
    }
}
