//! Pipeline stage enums for leads and orders, and the reminder target kind.
//!
//! Stages serialize with their display labels (`"Proposal Sent"`,
//! `"Order Received"`) so persisted records stay human-readable.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a stage or entity type string is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StageParseError {
    /// Not one of the six lead stages.
    #[error("invalid lead stage: {0}")]
    LeadStage(String),
    /// Not one of the four order stages.
    #[error("invalid order stage: {0}")]
    OrderStage(String),
    /// Neither `lead` nor `order`.
    #[error("invalid entity type: {0} (expected `lead` or `order`)")]
    EntityType(String),
}

/// Normalise user input so `Proposal Sent`, `proposal-sent`,
/// `PROPOSAL_SENT` and `proposalsent` all compare equal.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Position of a lead in the sales pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LeadStage {
    #[default]
    New,
    Contacted,
    Qualified,
    #[serde(rename = "Proposal Sent")]
    ProposalSent,
    Won,
    Lost,
}

impl LeadStage {
    /// Every stage, in pipeline order.
    pub const ALL: [Self; 6] = [
        Self::New,
        Self::Contacted,
        Self::Qualified,
        Self::ProposalSent,
        Self::Won,
        Self::Lost,
    ];

    /// Display label, identical to the serialized form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::Qualified => "Qualified",
            Self::ProposalSent => "Proposal Sent",
            Self::Won => "Won",
            Self::Lost => "Lost",
        }
    }

    /// A lead is open until it is either won or lost.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Won | Self::Lost)
    }
}

impl fmt::Display for LeadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStage {
    type Err = StageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|stage| normalize(stage.as_str()) == wanted)
            .ok_or_else(|| StageParseError::LeadStage(s.to_owned()))
    }
}

/// Position of an order in the fulfillment pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStage {
    #[default]
    #[serde(rename = "Order Received")]
    OrderReceived,
    #[serde(rename = "In Development")]
    InDevelopment,
    #[serde(rename = "Ready to Dispatch")]
    ReadyToDispatch,
    Dispatched,
}

impl OrderStage {
    /// Every stage, in pipeline order.
    pub const ALL: [Self; 4] = [
        Self::OrderReceived,
        Self::InDevelopment,
        Self::ReadyToDispatch,
        Self::Dispatched,
    ];

    /// Display label, identical to the serialized form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OrderReceived => "Order Received",
            Self::InDevelopment => "In Development",
            Self::ReadyToDispatch => "Ready to Dispatch",
            Self::Dispatched => "Dispatched",
        }
    }
}

impl fmt::Display for OrderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStage {
    type Err = StageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|stage| normalize(stage.as_str()) == wanted)
            .ok_or_else(|| StageParseError::OrderStage(s.to_owned()))
    }
}

/// Kind of entity a reminder is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Lead,
    Order,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lead => write!(f, "lead"),
            Self::Order => write!(f, "order"),
        }
    }
}

impl FromStr for EntityType {
    type Err = StageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lead" => Ok(Self::Lead),
            "order" => Ok(Self::Order),
            _ => Err(StageParseError::EntityType(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_stage_serializes_with_label() {
        let json = serde_json::to_string(&LeadStage::ProposalSent).unwrap();
        assert_eq!(json, "\"Proposal Sent\"");

        let parsed: LeadStage = serde_json::from_str("\"Won\"").unwrap();
        assert_eq!(parsed, LeadStage::Won);
    }

    #[test]
    fn test_lead_stage_rejects_unknown_label() {
        assert!(serde_json::from_str::<LeadStage>("\"Archived\"").is_err());
    }

    #[test]
    fn test_order_stage_serializes_with_label() {
        let json = serde_json::to_string(&OrderStage::ReadyToDispatch).unwrap();
        assert_eq!(json, "\"Ready to Dispatch\"");
    }

    #[test]
    fn test_parse_is_lenient_about_separators() {
        assert_eq!(
            "proposal-sent".parse::<LeadStage>().unwrap(),
            LeadStage::ProposalSent
        );
        assert_eq!(
            "Proposal Sent".parse::<LeadStage>().unwrap(),
            LeadStage::ProposalSent
        );
        assert_eq!(
            "IN_DEVELOPMENT".parse::<OrderStage>().unwrap(),
            OrderStage::InDevelopment
        );
        assert!(matches!(
            "shipped".parse::<OrderStage>(),
            Err(StageParseError::OrderStage(_))
        ));
    }

    #[test]
    fn test_is_open() {
        let open: Vec<_> = LeadStage::ALL.into_iter().filter(LeadStage::is_open).collect();
        assert_eq!(
            open,
            vec![
                LeadStage::New,
                LeadStage::Contacted,
                LeadStage::Qualified,
                LeadStage::ProposalSent
            ]
        );
    }

    #[test]
    fn test_entity_type_roundtrip() {
        assert_eq!(serde_json::to_string(&EntityType::Order).unwrap(), "\"order\"");
        assert_eq!("Lead".parse::<EntityType>().unwrap(), EntityType::Lead);
        assert!("contact".parse::<EntityType>().is_err());
    }
}
