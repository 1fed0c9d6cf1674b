//! Seed snapshots for the in-memory collections.
//!
//! # Responsibility
//! - Parse the bundled JSON fixtures compiled into the crate.
//! - Load caller-provided fixtures from a directory with the same layout.
//!
//! # Invariants
//! - Each fixture is an ordered JSON array of records carrying an `Id`.
//! - Ids are unique per collection; duplicates are rejected at load time.

use crate::model::activity::Activity;
use crate::model::contact::Contact;
use crate::model::deal::Deal;
use crate::model::entity::{Entity, EntityId};
use crate::model::notification::Notification;
use crate::model::task::Task;
use log::info;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Version of the bundled fixture snapshot.
pub const SEED_VERSION: u32 = 1;

const CONTACTS_FILE: &str = "contacts.json";
const DEALS_FILE: &str = "deals.json";
const TASKS_FILE: &str = "tasks.json";
const ACTIVITIES_FILE: &str = "activities.json";
const NOTIFICATIONS_FILE: &str = "notifications.json";

const BUNDLED_CONTACTS: &str = include_str!("../../seed/contacts.json");
const BUNDLED_DEALS: &str = include_str!("../../seed/deals.json");
const BUNDLED_TASKS: &str = include_str!("../../seed/tasks.json");
const BUNDLED_ACTIVITIES: &str = include_str!("../../seed/activities.json");
const BUNDLED_NOTIFICATIONS: &str = include_str!("../../seed/notifications.json");

/// Seed loading failure.
#[derive(Debug)]
pub enum SeedError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        entity: &'static str,
        source: serde_json::Error,
    },
    DuplicateId {
        entity: &'static str,
        id: EntityId,
    },
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read seed file `{}`: {source}", path.display())
            }
            Self::Parse { entity, source } => {
                write!(f, "invalid {entity} seed data: {source}")
            }
            Self::DuplicateId { entity, id } => {
                write!(f, "duplicate {entity} id {id} in seed data")
            }
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::DuplicateId { .. } => None,
        }
    }
}

/// Initial contents for every collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedData {
    pub contacts: Vec<Contact>,
    pub deals: Vec<Deal>,
    pub tasks: Vec<Task>,
    pub activities: Vec<Activity>,
    pub notifications: Vec<Notification>,
}

impl SeedData {
    /// Parses the fixtures compiled into this crate.
    pub fn bundled() -> Result<Self, SeedError> {
        let seed = Self {
            contacts: parse_collection(BUNDLED_CONTACTS)?,
            deals: parse_collection(BUNDLED_DEALS)?,
            tasks: parse_collection(BUNDLED_TASKS)?,
            activities: parse_collection(BUNDLED_ACTIVITIES)?,
            notifications: parse_collection(BUNDLED_NOTIFICATIONS)?,
        };
        info!(
            "event=seed_load module=repo status=ok source=bundled version={} {}",
            SEED_VERSION,
            seed.summary()
        );
        Ok(seed)
    }

    /// Loads `contacts.json`, `deals.json`, `tasks.json`, `activities.json`
    /// and `notifications.json` from `dir`. A missing file yields an empty
    /// collection.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, SeedError> {
        let dir = dir.as_ref();
        let seed = Self {
            contacts: read_collection(dir, CONTACTS_FILE)?,
            deals: read_collection(dir, DEALS_FILE)?,
            tasks: read_collection(dir, TASKS_FILE)?,
            activities: read_collection(dir, ACTIVITIES_FILE)?,
            notifications: read_collection(dir, NOTIFICATIONS_FILE)?,
        };
        info!(
            "event=seed_load module=repo status=ok source=dir dir={} {}",
            dir.display(),
            seed.summary()
        );
        Ok(seed)
    }

    fn summary(&self) -> String {
        format!(
            "contacts={} deals={} tasks={} activities={} notifications={}",
            self.contacts.len(),
            self.deals.len(),
            self.tasks.len(),
            self.activities.len(),
            self.notifications.len()
        )
    }
}

/// Parses one fixture array and checks id uniqueness.
pub fn parse_collection<E>(json: &str) -> Result<Vec<E>, SeedError>
where
    E: Entity + DeserializeOwned,
{
    let records: Vec<E> = serde_json::from_str(json).map_err(|source| SeedError::Parse {
        entity: E::KIND,
        source,
    })?;

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(record.id()) {
            return Err(SeedError::DuplicateId {
                entity: E::KIND,
                id: record.id(),
            });
        }
    }

    Ok(records)
}

fn read_collection<E>(dir: &Path, file_name: &str) -> Result<Vec<E>, SeedError>
where
    E: Entity + DeserializeOwned,
{
    let path = dir.join(file_name);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let json = std::fs::read_to_string(&path).map_err(|source| SeedError::Io {
        path: path.clone(),
        source,
    })?;
    parse_collection(&json)
}

#[cfg(test)]
mod tests {
    use super::{parse_collection, SeedData, SeedError};
    use crate::model::contact::Contact;
    use crate::model::notification::Notification;

    #[test]
    fn bundled_snapshot_parses() {
        let seed = SeedData::bundled().expect("bundled seed should parse");
        assert!(!seed.contacts.is_empty());
        assert!(!seed.deals.is_empty());
        assert!(!seed.tasks.is_empty());
        assert!(!seed.activities.is_empty());
        assert!(!seed.notifications.is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"[
            {"Id": 1, "title": "a", "message": "m", "type": "info", "read": false, "createdAt": "2024-01-01T00:00:00Z"},
            {"Id": 1, "title": "b", "message": "m", "type": "info", "read": false, "createdAt": "2024-01-01T00:00:00Z"}
        ]"#;
        let err = parse_collection::<Notification>(json).unwrap_err();
        assert!(matches!(
            err,
            SeedError::DuplicateId {
                entity: "Notification",
                id: 1
            }
        ));
    }

    #[test]
    fn parse_error_names_the_entity() {
        let err = parse_collection::<Contact>(r#"[{"Id": "x"}]"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid Contact seed data"));
    }

    #[test]
    fn from_dir_treats_missing_files_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("contacts.json"),
            r#"[{"Id": 4, "name": "Solo", "email": "", "phone": "", "company": "", "position": "", "status": "Lead"}]"#,
        )
        .unwrap();

        let seed = SeedData::from_dir(dir.path()).unwrap();
        assert_eq!(seed.contacts.len(), 1);
        assert_eq!(seed.contacts[0].id, 4);
        assert!(seed.deals.is_empty());
    }
}
