//! Fulfillment orders.
//!
//! `lead_name` is a snapshot of the originating lead's name taken when the
//! order is created. Renaming the lead later does not touch it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Lead;
use crate::types::{LeadId, OrderId, OrderStage};

/// A fulfillment record for a won lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub lead_id: LeadId,
    pub lead_name: String,
    pub stage: OrderStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything needed to create an [`Order`] except its id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub lead_id: LeadId,
    pub lead_name: String,
    pub stage: OrderStage,
    pub details: Option<String>,
    pub courier: Option<String>,
    pub tracking_number: Option<String>,
}

impl NewOrder {
    /// An `Order Received` order referencing `lead`, with its name copied.
    #[must_use]
    pub fn for_lead(lead: &Lead) -> Self {
        Self {
            lead_id: lead.id.clone(),
            lead_name: lead.name.clone(),
            stage: OrderStage::OrderReceived,
            details: None,
            courier: None,
            tracking_number: None,
        }
    }

    pub(crate) fn into_order(self, id: OrderId, now: DateTime<Utc>) -> Order {
        Order {
            id,
            lead_id: self.lead_id,
            lead_name: self.lead_name,
            stage: self.stage,
            details: self.details,
            courier: self.courier,
            tracking_number: self.tracking_number,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A partial update merged over an existing [`Order`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderPatch {
    pub lead_id: Option<LeadId>,
    pub lead_name: Option<String>,
    pub stage: Option<OrderStage>,
    pub details: Option<Option<String>>,
    pub courier: Option<Option<String>>,
    pub tracking_number: Option<Option<String>>,
}

impl OrderPatch {
    pub(crate) fn apply(self, order: &mut Order) {
        if let Some(lead_id) = self.lead_id {
            order.lead_id = lead_id;
        }
        if let Some(lead_name) = self.lead_name {
            order.lead_name = lead_name;
        }
        if let Some(stage) = self.stage {
            order.stage = stage;
        }
        if let Some(details) = self.details {
            order.details = details;
        }
        if let Some(courier) = self.courier {
            order.courier = courier;
        }
        if let Some(tracking_number) = self.tracking_number {
            order.tracking_number = tracking_number;
        }
    }
}
