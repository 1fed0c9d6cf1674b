//! Notification domain model.
//!
//! # Invariants
//! - A created notification always starts unread with `created_at = now`;
//!   the draft shape has no field for either.

use crate::model::entity::{Entity, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity tag, lower-case on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Success,
    Warning,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "Id")]
    pub id: EntityId,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a notification.
///
/// Unknown keys such as `read` or `createdAt` are ignored when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NotificationDraft {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPatch {
    pub title: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<NotificationType>,
    pub read: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

impl NotificationPatch {
    /// Patch that only flips the read flag.
    pub fn read(read: bool) -> Self {
        Self {
            read: Some(read),
            ..Self::default()
        }
    }
}

impl Entity for Notification {
    type Draft = NotificationDraft;
    type Patch = NotificationPatch;

    const KIND: &'static str = "Notification";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: NotificationDraft) -> Self {
        Self {
            id,
            title: draft.title,
            message: draft.message,
            kind: draft.kind,
            read: false,
            created_at: Utc::now(),
        }
    }

    fn apply_patch(&mut self, patch: NotificationPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(message) = patch.message {
            self.message = message;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(read) = patch.read {
            self.read = read;
        }
        if let Some(created_at) = patch.created_at {
            self.created_at = created_at;
        }
    }
}
