//! Dashboard and contact-detail aggregates.

use crate::model::activity::Activity;
use crate::model::contact::Contact;
use crate::model::deal::Deal;
use crate::model::entity::EntityId;
use crate::model::task::{Task, TaskStatus};
use serde::Serialize;

/// Number of rows shown in the dashboard's recent/upcoming panels.
pub const DASHBOARD_PANEL_SIZE: usize = 5;

/// Headline numbers shown on the dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_contacts: usize,
    /// Deals not yet Closed Won / Closed Lost.
    pub active_deals: usize,
    /// Sum over every deal, closed ones included.
    pub total_deal_value: f64,
    pub pending_tasks: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub metrics: DashboardMetrics,
    pub recent_activities: Vec<Activity>,
    pub upcoming_tasks: Vec<Task>,
}

/// A contact with every record that references it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactDetail {
    pub contact: Contact,
    pub deals: Vec<Deal>,
    pub tasks: Vec<Task>,
    pub activities: Vec<Activity>,
}

pub fn dashboard_metrics(contacts: &[Contact], deals: &[Deal], tasks: &[Task]) -> DashboardMetrics {
    DashboardMetrics {
        total_contacts: contacts.len(),
        active_deals: deals.iter().filter(|deal| !deal.stage.is_closed()).count(),
        total_deal_value: deals.iter().map(|deal| deal.value).sum(),
        pending_tasks: tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Pending)
            .count(),
    }
}

/// Newest `limit` activities.
pub fn recent_activities(activities: &[Activity], limit: usize) -> Vec<Activity> {
    let mut sorted = activities.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted.truncate(limit);
    sorted
}

/// The `limit` not-completed tasks due soonest.
pub fn upcoming_tasks(tasks: &[Task], limit: usize) -> Vec<Task> {
    let mut open: Vec<Task> = tasks
        .iter()
        .filter(|task| task.status != TaskStatus::Completed)
        .cloned()
        .collect();
    open.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    open.truncate(limit);
    open
}

pub fn build_dashboard(
    contacts: &[Contact],
    deals: &[Deal],
    tasks: &[Task],
    activities: &[Activity],
) -> Dashboard {
    Dashboard {
        metrics: dashboard_metrics(contacts, deals, tasks),
        recent_activities: recent_activities(activities, DASHBOARD_PANEL_SIZE),
        upcoming_tasks: upcoming_tasks(tasks, DASHBOARD_PANEL_SIZE),
    }
}

/// Collects the deals, tasks and activities that point at `contact`.
pub fn contact_detail(
    contact: Contact,
    deals: &[Deal],
    tasks: &[Task],
    activities: &[Activity],
) -> ContactDetail {
    let id: EntityId = contact.id;
    ContactDetail {
        deals: deals
            .iter()
            .filter(|deal| deal.contact_id == id)
            .cloned()
            .collect(),
        tasks: tasks
            .iter()
            .filter(|task| task.contact_id == Some(id))
            .cloned()
            .collect(),
        activities: activities
            .iter()
            .filter(|activity| activity.contact_id == id)
            .cloned()
            .collect(),
        contact,
    }
}
