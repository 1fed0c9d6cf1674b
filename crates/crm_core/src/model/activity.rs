//! Activity (interaction log) domain model.

use crate::model::entity::{Entity, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    Call,
    Email,
    Meeting,
    Other,
}

/// One logged interaction with a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "Id")]
    pub id: EntityId,
    pub subject: String,
    #[serde(default)]
    pub notes: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub timestamp: DateTime<Utc>,
    pub contact_id: EntityId,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDraft {
    pub subject: String,
    #[serde(default)]
    pub notes: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub timestamp: DateTime<Utc>,
    pub contact_id: EntityId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPatch {
    pub subject: Option<String>,
    pub notes: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<ActivityType>,
    pub timestamp: Option<DateTime<Utc>>,
    pub contact_id: Option<EntityId>,
}

impl Entity for Activity {
    type Draft = ActivityDraft;
    type Patch = ActivityPatch;

    const KIND: &'static str = "Activity";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: ActivityDraft) -> Self {
        Self {
            id,
            subject: draft.subject,
            notes: draft.notes,
            kind: draft.kind,
            timestamp: draft.timestamp,
            contact_id: draft.contact_id,
        }
    }

    fn apply_patch(&mut self, patch: ActivityPatch) {
        if let Some(subject) = patch.subject {
            self.subject = subject;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(timestamp) = patch.timestamp {
            self.timestamp = timestamp;
        }
        if let Some(contact_id) = patch.contact_id {
            self.contact_id = contact_id;
        }
    }
}
