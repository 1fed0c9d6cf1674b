//! Core data layer for the CRM front end.
//! In-memory, seed-initialised collections behind async CRUD services.

pub mod config;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{ConfigError, LatencyProfile, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogSink};
pub use model::activity::{Activity, ActivityDraft, ActivityPatch, ActivityType};
pub use model::contact::{Contact, ContactDraft, ContactPatch, ContactStatus};
pub use model::deal::{Deal, DealDraft, DealPatch, DealStage};
pub use model::entity::{Entity, EntityId};
pub use model::notification::{
    Notification, NotificationDraft, NotificationPatch, NotificationType,
};
pub use model::task::{Task, TaskDraft, TaskPatch, TaskPriority, TaskStatus};
pub use query::dashboard::{ContactDetail, Dashboard, DashboardMetrics};
pub use repo::entity_repo::{EntityRepository, InMemoryRepository, RepoError, RepoResult};
pub use repo::seed::{SeedData, SeedError, SEED_VERSION};
pub use service::entity_service::EntityService;
pub use service::notification_service::NotificationService;
pub use store::{CrmStore, StoreError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
