//! Deal domain model.
//!
//! # Invariants
//! - `value` and `probability` are stored as given; range checks belong to
//!   the calling form layer.
//! - `contact_id` may point at a contact that no longer exists.

use crate::model::entity::{Entity, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pipeline stage of a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealStage {
    Lead,
    Qualified,
    Proposal,
    Negotiation,
    #[serde(rename = "Closed Won")]
    ClosedWon,
    #[serde(rename = "Closed Lost")]
    ClosedLost,
}

impl DealStage {
    /// Stages in pipeline display order.
    pub const ALL: [DealStage; 6] = [
        Self::Lead,
        Self::Qualified,
        Self::Proposal,
        Self::Negotiation,
        Self::ClosedWon,
        Self::ClosedLost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lead => "Lead",
            Self::Qualified => "Qualified",
            Self::Proposal => "Proposal",
            Self::Negotiation => "Negotiation",
            Self::ClosedWon => "Closed Won",
            Self::ClosedLost => "Closed Lost",
        }
    }

    /// Returns whether the deal has left the active pipeline.
    pub fn is_closed(self) -> bool {
        matches!(self, Self::ClosedWon | Self::ClosedLost)
    }
}

/// Stored deal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    #[serde(rename = "Id")]
    pub id: EntityId,
    pub title: String,
    pub value: f64,
    pub stage: DealStage,
    pub contact_id: EntityId,
    pub probability: i64,
    pub close_date: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a deal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealDraft {
    pub title: String,
    pub value: f64,
    pub stage: DealStage,
    pub contact_id: EntityId,
    pub probability: i64,
    pub close_date: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Partial update for a deal.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealPatch {
    pub title: Option<String>,
    pub value: Option<f64>,
    pub stage: Option<DealStage>,
    pub contact_id: Option<EntityId>,
    pub probability: Option<i64>,
    pub close_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for Deal {
    type Draft = DealDraft;
    type Patch = DealPatch;

    const KIND: &'static str = "Deal";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: DealDraft) -> Self {
        Self {
            id,
            title: draft.title,
            value: draft.value,
            stage: draft.stage,
            contact_id: draft.contact_id,
            probability: draft.probability,
            close_date: draft.close_date,
            notes: draft.notes,
            created_at: draft.created_at,
        }
    }

    fn apply_patch(&mut self, patch: DealPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
        if let Some(stage) = patch.stage {
            self.stage = stage;
        }
        if let Some(contact_id) = patch.contact_id {
            self.contact_id = contact_id;
        }
        if let Some(probability) = patch.probability {
            self.probability = probability;
        }
        if let Some(close_date) = patch.close_date {
            self.close_date = close_date;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(created_at) = patch.created_at {
            self.created_at = created_at;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DealStage;

    #[test]
    fn closed_stages_use_spaced_wire_tags() {
        let stage: DealStage = serde_json::from_str(r#""Closed Won""#).unwrap();
        assert_eq!(stage, DealStage::ClosedWon);
        assert_eq!(
            serde_json::to_string(&DealStage::ClosedLost).unwrap(),
            r#""Closed Lost""#
        );
    }

    #[test]
    fn display_tags_match_wire_tags() {
        for stage in DealStage::ALL {
            let wire = serde_json::to_string(&stage).unwrap();
            assert_eq!(wire, format!("\"{}\"", stage.as_str()));
        }
    }

    #[test]
    fn only_won_and_lost_are_closed() {
        let closed = DealStage::ALL
            .iter()
            .filter(|stage| stage.is_closed())
            .count();
        assert_eq!(closed, 2);
        assert!(!DealStage::Negotiation.is_closed());
    }
}
