//! Sales leads.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{LeadId, LeadStage};

/// A prospective sale tracked through the lead pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    /// Free-form contact details (email, phone, person).
    pub contact: String,
    pub company: String,
    pub product_interest: String,
    pub stage: LeadStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything needed to create a [`Lead`] except its id and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewLead {
    pub name: String,
    pub contact: String,
    pub company: String,
    pub product_interest: String,
    pub stage: LeadStage,
    pub follow_up_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl NewLead {
    /// A lead in the `New` stage with only a name set.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub(crate) fn into_lead(self, id: LeadId, now: DateTime<Utc>) -> Lead {
        Lead {
            id,
            name: self.name,
            contact: self.contact,
            company: self.company,
            product_interest: self.product_interest,
            stage: self.stage,
            follow_up_date: self.follow_up_date,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A partial update merged over an existing [`Lead`].
///
/// `None` leaves a field untouched. Nullable fields take
/// `Some(None)` to clear them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadPatch {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub company: Option<String>,
    pub product_interest: Option<String>,
    pub stage: Option<LeadStage>,
    pub follow_up_date: Option<Option<NaiveDate>>,
    pub notes: Option<Option<String>>,
}

impl LeadPatch {
    /// True when applying the patch would change nothing but `updatedAt`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.contact.is_none()
            && self.company.is_none()
            && self.product_interest.is_none()
            && self.stage.is_none()
            && self.follow_up_date.is_none()
            && self.notes.is_none()
    }

    pub(crate) fn apply(self, lead: &mut Lead) {
        if let Some(name) = self.name {
            lead.name = name;
        }
        if let Some(contact) = self.contact {
            lead.contact = contact;
        }
        if let Some(company) = self.company {
            lead.company = company;
        }
        if let Some(product_interest) = self.product_interest {
            lead.product_interest = product_interest;
        }
        if let Some(stage) = self.stage {
            lead.stage = stage;
        }
        if let Some(follow_up_date) = self.follow_up_date {
            lead.follow_up_date = follow_up_date;
        }
        if let Some(notes) = self.notes {
            lead.notes = notes;
        }
    }
}
