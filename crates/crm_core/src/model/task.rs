//! Task domain model.

use crate::model::entity::{Entity, EntityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

/// Task lifecycle tag. Any status may be set from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// Stored task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "Id")]
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    /// `None` renders as "Unassigned" in views.
    #[serde(default)]
    pub contact_id: Option<EntityId>,
    #[serde(default)]
    pub assignee: String,
}

/// Input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    #[serde(default)]
    pub contact_id: Option<EntityId>,
    #[serde(default)]
    pub assignee: String,
}

/// Partial update for a task. `contact_id: Some(None)` unlinks the contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    #[serde(default, deserialize_with = "crate::model::deserialize_some")]
    pub contact_id: Option<Option<EntityId>>,
    pub assignee: Option<String>,
}

impl Entity for Task {
    type Draft = TaskDraft;
    type Patch = TaskPatch;

    const KIND: &'static str = "Task";

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: TaskDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            priority: draft.priority,
            status: draft.status,
            contact_id: draft.contact_id,
            assignee: draft.assignee,
        }
    }

    fn apply_patch(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(contact_id) = patch.contact_id {
            self.contact_id = contact_id;
        }
        if let Some(assignee) = patch.assignee {
            self.assignee = assignee;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskPatch, TaskStatus};
    use crate::model::entity::Entity;

    fn sample() -> Task {
        serde_json::from_str(
            r#"{
                "Id": 2,
                "title": "Send proposal",
                "description": "Pricing v2",
                "dueDate": "2024-03-01T00:00:00Z",
                "priority": "High",
                "status": "In Progress",
                "contactId": 5,
                "assignee": "Sam"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn null_contact_patch_unassigns_task() {
        let mut task = sample();
        let patch: TaskPatch = serde_json::from_str(r#"{"contactId":null}"#).unwrap();
        task.apply_patch(patch);
        assert_eq!(task.contact_id, None);
        assert_eq!(task.status, TaskStatus::InProgress);
    }

    #[test]
    fn status_display_tag_matches_wire_tag() {
        let statuses = [
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
            TaskStatus::Cancelled,
        ];
        for status in statuses {
            let wire = serde_json::to_string(&status).unwrap();
            assert_eq!(wire, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn status_can_move_backwards() {
        let mut task = sample();
        task.apply_patch(TaskPatch {
            status: Some(TaskStatus::Completed),
            ..TaskPatch::default()
        });
        task.apply_patch(TaskPatch {
            status: Some(TaskStatus::Pending),
            ..TaskPatch::default()
        });
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.contact_id, Some(5));
    }
}
