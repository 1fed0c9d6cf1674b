//! Contact domain model.
//!
//! # Responsibility
//! - Define the person/company record at the centre of the CRM.
//!
//! # Invariants
//! - `created_at`/`last_activity` are optional because forms may omit them.
//! - Tags keep caller order; deduplication is a caller concern.

use crate::model::entity::{Entity, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Relationship status of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactStatus {
    Active,
    Inactive,
    Lead,
    Customer,
}

impl ContactStatus {
    /// Stable tag used on the wire and in filters.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Lead => "Lead",
            Self::Customer => "Customer",
        }
    }
}

/// Stored contact record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(rename = "Id")]
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub position: String,
    pub status: ContactStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
}

/// Input for creating a contact.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    pub status: ContactStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
}

impl ContactDraft {
    /// Draft with only a name and status set, everything else empty.
    pub fn new(name: impl Into<String>, status: ContactStatus) -> Self {
        Self {
            name: name.into(),
            email: String::new(),
            phone: String::new(),
            company: String::new(),
            position: String::new(),
            status,
            tags: Vec::new(),
            created_at: None,
            last_activity: None,
        }
    }
}

/// Partial update for a contact. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub status: Option<ContactStatus>,
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "crate::model::deserialize_some")]
    pub created_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "crate::model::deserialize_some")]
    pub last_activity: Option<Option<DateTime<Utc>>>,
}

impl Entity for Contact {
    type Draft = ContactDraft;
    type Patch = ContactPatch;

    const KIND: &'static str = "Contact";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: ContactDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            company: draft.company,
            position: draft.position,
            status: draft.status,
            tags: draft.tags,
            created_at: draft.created_at,
            last_activity: draft.last_activity,
        }
    }

    fn apply_patch(&mut self, patch: ContactPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(company) = patch.company {
            self.company = company;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(created_at) = patch.created_at {
            self.created_at = created_at;
        }
        if let Some(last_activity) = patch.last_activity {
            self.last_activity = last_activity;
        }
    }
}
