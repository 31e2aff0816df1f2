//! Follow-up reminders attached to a lead or an order.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{EntityType, ReminderId};

/// A dated follow-up task.
///
/// `entity_id` holds a lead id or an order id depending on `entity_type`.
/// Nothing enforces that the target exists; cascading deletes on the store
/// keep the two in step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: ReminderId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: DateTime<Utc>,
    pub completed: bool,
    pub entity_type: EntityType,
    pub entity_id: String,
}

impl Reminder {
    /// Whether this reminder annotates the given entity.
    #[must_use]
    pub fn targets(&self, entity_type: EntityType, entity_id: &str) -> bool {
        self.entity_type == entity_type && self.entity_id == entity_id
    }
}

/// Parse a reminder date: RFC 3339, `YYYY-MM-DD HH:MM` (UTC) or a bare
/// `YYYY-MM-DD` (midnight UTC).
#[must_use]
pub fn parse_reminder_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M") {
        return Some(at.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_reminder_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid reminder date `{raw}`")))
}

/// Everything needed to create a [`Reminder`] except its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReminder {
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub completed: bool,
    pub entity_type: EntityType,
    pub entity_id: String,
}

impl NewReminder {
    /// An open reminder with no description.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        date: DateTime<Utc>,
        entity_type: EntityType,
        entity_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            date,
            completed: false,
            entity_type,
            entity_id: entity_id.into(),
        }
    }

    pub(crate) fn into_reminder(self, id: ReminderId) -> Reminder {
        Reminder {
            id,
            title: self.title,
            description: self.description,
            date: self.date,
            completed: self.completed,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
        }
    }
}

/// A partial update merged over an existing [`Reminder`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub date: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<String>,
}

impl ReminderPatch {
    pub(crate) fn apply(self, reminder: &mut Reminder) {
        if let Some(title) = self.title {
            reminder.title = title;
        }
        if let Some(description) = self.description {
            reminder.description = description;
        }
        if let Some(date) = self.date {
            reminder.date = date;
        }
        if let Some(completed) = self.completed {
            reminder.completed = completed;
        }
        if let Some(entity_type) = self.entity_type {
            reminder.entity_type = entity_type;
        }
        if let Some(entity_id) = self.entity_id {
            reminder.entity_id = entity_id;
        }
    }
}
