//! Search and filter helpers for list pages.

use crate::model::contact::{Contact, ContactStatus};
use crate::model::deal::{Deal, DealStage};
use crate::model::entity::EntityId;
use crate::model::notification::{Notification, NotificationType};
use crate::model::task::{Task, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};

/// Display name used when a contact reference cannot be resolved.
pub const UNKNOWN_CONTACT: &str = "Unknown Contact";
/// Display name used for tasks without a contact.
pub const UNASSIGNED: &str = "Unassigned";

/// Contact list filter. Empty query and `None` status match everything.
///
/// The query is matched verbatim; surrounding whitespace is part of the needle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    pub query: String,
    pub status: Option<ContactStatus>,
}

/// Task list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub query: String,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

/// Notification feed filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationFilter {
    #[default]
    All,
    Unread,
    Read,
    Type(NotificationType),
}

/// Feed order by `created_at`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

/// One pipeline column: the deals in a stage and their summed value.
#[derive(Debug, Clone, PartialEq)]
pub struct StageColumn {
    pub stage: DealStage,
    pub deals: Vec<Deal>,
    pub total_value: f64,
}

/// Case-insensitive substring search over name, email and company.
pub fn search_contacts(contacts: &[Contact], filter: &ContactFilter) -> Vec<Contact> {
    let needle = filter.query.to_lowercase();
    contacts
        .iter()
        .filter(|contact| {
            needle.is_empty()
                || contains_folded(&contact.name, &needle)
                || contains_folded(&contact.email, &needle)
                || contains_folded(&contact.company, &needle)
        })
        .filter(|contact| filter.status.map_or(true, |status| contact.status == status))
        .cloned()
        .collect()
}

/// Search over title and description with optional status/priority filters.
pub fn filter_tasks(tasks: &[Task], filter: &TaskFilter) -> Vec<Task> {
    let needle = filter.query.to_lowercase();
    tasks
        .iter()
        .filter(|task| {
            needle.is_empty()
                || contains_folded(&task.title, &needle)
                || contains_folded(&task.description, &needle)
        })
        .filter(|task| filter.status.map_or(true, |status| task.status == status))
        .filter(|task| {
            filter
                .priority
                .map_or(true, |priority| task.priority == priority)
        })
        .cloned()
        .collect()
}

/// A task is overdue when it is not completed and its due date has passed.
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    task.status != TaskStatus::Completed && task.due_date < now
}

pub fn deals_in_stage(deals: &[Deal], stage: DealStage) -> Vec<Deal> {
    deals
        .iter()
        .filter(|deal| deal.stage == stage)
        .cloned()
        .collect()
}

pub fn stage_value(deals: &[Deal], stage: DealStage) -> f64 {
    deals
        .iter()
        .filter(|deal| deal.stage == stage)
        .map(|deal| deal.value)
        .sum()
}

/// Groups deals into one column per stage, in pipeline order.
pub fn pipeline(deals: &[Deal]) -> Vec<StageColumn> {
    DealStage::ALL
        .iter()
        .map(|&stage| StageColumn {
            stage,
            deals: deals_in_stage(deals, stage),
            total_value: stage_value(deals, stage),
        })
        .collect()
}

/// Filters the feed and orders it by creation time.
pub fn filter_notifications(
    notifications: &[Notification],
    filter: NotificationFilter,
    order: SortOrder,
) -> Vec<Notification> {
    let mut selected: Vec<Notification> = notifications
        .iter()
        .filter(|notification| match filter {
            NotificationFilter::All => true,
            NotificationFilter::Unread => !notification.read,
            NotificationFilter::Read => notification.read,
            NotificationFilter::Type(kind) => notification.kind == kind,
        })
        .cloned()
        .collect();

    match order {
        SortOrder::Newest => selected.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Oldest => selected.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
    selected
}

/// Resolves a contact id to its name, or `UNKNOWN_CONTACT`.
pub fn contact_name(contacts: &[Contact], contact_id: EntityId) -> &str {
    contacts
        .iter()
        .find(|contact| contact.id == contact_id)
        .map_or(UNKNOWN_CONTACT, |contact| contact.name.as_str())
}

/// Like `contact_name`, but `None` renders as `UNASSIGNED`.
pub fn task_contact_name(contacts: &[Contact], contact_id: Option<EntityId>) -> &str {
    match contact_id {
        Some(id) => contact_name(contacts, id),
        None => UNASSIGNED,
    }
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}
