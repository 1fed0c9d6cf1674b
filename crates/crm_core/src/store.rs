//! Application-wide store handle.
//!
//! # Responsibility
//! - Build one service per entity type from seed data and configuration.
//! - Hand out cheap clones that all point at the same collections.
//! - Run the multi-collection loads the dashboard and detail pages need.
//!
//! # Invariants
//! - Construct once at startup and pass the handle around; there is no
//!   global instance.
//! - Foreign keys are never checked and deletes never cascade.

use crate::config::{ConfigError, StoreConfig};
use crate::model::activity::Activity;
use crate::model::contact::Contact;
use crate::model::deal::Deal;
use crate::model::entity::EntityId;
use crate::model::task::Task;
use crate::query::dashboard::{build_dashboard, contact_detail, ContactDetail, Dashboard};
use crate::repo::entity_repo::{InMemoryRepository, RepoResult};
use crate::repo::seed::{SeedData, SeedError};
use crate::service::entity_service::EntityService;
use crate::service::notification_service::NotificationService;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store construction failure.
#[derive(Debug)]
pub enum StoreError {
    Config(ConfigError),
    Seed(SeedError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Seed(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Seed(err) => Some(err),
        }
    }
}

impl From<ConfigError> for StoreError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<SeedError> for StoreError {
    fn from(value: SeedError) -> Self {
        Self::Seed(value)
    }
}

/// Handle onto every CRM collection. Clones share state.
#[derive(Clone)]
pub struct CrmStore {
    contacts: EntityService<Contact>,
    deals: EntityService<Deal>,
    tasks: EntityService<Task>,
    activities: EntityService<Activity>,
    notifications: NotificationService,
}

impl CrmStore {
    /// Opens a store over the bundled seed snapshot.
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        let seed = SeedData::bundled()?;
        Self::with_seed(seed, config)
    }

    /// Opens a store over caller-provided seed data.
    pub fn with_seed(seed: SeedData, config: StoreConfig) -> Result<Self, StoreError> {
        config.validate()?;
        info!(
            "event=store_open module=store status=ok contacts={} deals={} tasks={} activities={} notifications={}",
            seed.contacts.len(),
            seed.deals.len(),
            seed.tasks.len(),
            seed.activities.len(),
            seed.notifications.len()
        );

        Ok(Self {
            contacts: EntityService::new(
                InMemoryRepository::from_records(seed.contacts),
                config.contacts,
            ),
            deals: EntityService::new(InMemoryRepository::from_records(seed.deals), config.deals),
            tasks: EntityService::new(InMemoryRepository::from_records(seed.tasks), config.tasks),
            activities: EntityService::new(
                InMemoryRepository::from_records(seed.activities),
                config.activities,
            ),
            notifications: NotificationService::new(
                InMemoryRepository::from_records(seed.notifications),
                config.notifications,
            ),
        })
    }

    pub fn contacts(&self) -> &EntityService<Contact> {
        &self.contacts
    }

    pub fn deals(&self) -> &EntityService<Deal> {
        &self.deals
    }

    pub fn tasks(&self) -> &EntityService<Task> {
        &self.tasks
    }

    pub fn activities(&self) -> &EntityService<Activity> {
        &self.activities
    }

    pub fn notifications(&self) -> &NotificationService {
        &self.notifications
    }

    /// Loads contacts, deals, tasks and activities concurrently and builds
    /// the dashboard panels.
    pub async fn dashboard(&self) -> RepoResult<Dashboard> {
        let (contacts, deals, tasks, activities) = tokio::try_join!(
            self.contacts.get_all(),
            self.deals.get_all(),
            self.tasks.get_all(),
            self.activities.get_all()
        )?;
        Ok(build_dashboard(&contacts, &deals, &tasks, &activities))
    }

    /// Loads one contact with its deals, tasks and activities.
    ///
    /// Fails with `NotFound` when the contact does not exist.
    pub async fn contact_detail(&self, id: EntityId) -> RepoResult<ContactDetail> {
        let (contact, deals, tasks, activities) = tokio::try_join!(
            self.contacts.get_by_id(id),
            self.deals.get_all(),
            self.tasks.get_all(),
            self.activities.get_all()
        )?;
        Ok(contact_detail(contact, &deals, &tasks, &activities))
    }
}
