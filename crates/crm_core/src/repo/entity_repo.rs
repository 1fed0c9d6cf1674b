//! Entity repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Own one ordered collection per entity type.
//! - Assign identifiers and apply merges inside a single critical section.
//!
//! # Invariants
//! - Records keep insertion order; new records are appended.
//! - New ids come from a high-water mark that only grows, so an id is never
//!   handed out twice within a repository's lifetime, even after deletes.
//! - Every read hands back owned clones; callers never alias stored records.

use crate::model::entity::{Entity, EntityId};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, RwLock};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entity lookups and mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// No record with this id exists in the collection.
    NotFound { kind: &'static str, id: EntityId },
    /// The high-water mark already sits at `EntityId::MAX`.
    IdsExhausted { kind: &'static str },
    /// The collection lock was poisoned by a panicking writer.
    LockPoisoned(&'static str),
}

impl RepoError {
    /// Returns whether this is the not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::IdsExhausted { kind } => write!(f, "{kind} ids exhausted"),
            Self::LockPoisoned(mode) => write!(f, "collection lock poisoned during {mode}"),
        }
    }
}

impl Error for RepoError {}

/// Repository interface for entity CRUD operations.
pub trait EntityRepository<E: Entity>: Send + Sync {
    /// Returns every record in insertion order.
    fn list(&self) -> RepoResult<Vec<E>>;
    fn get(&self, id: EntityId) -> RepoResult<Option<E>>;
    /// Assigns the next id, appends the record and returns it.
    fn insert(&self, draft: E::Draft) -> RepoResult<E>;
    /// Merges `patch` onto the stored record. Fails with `NotFound`.
    fn update(&self, id: EntityId, patch: E::Patch) -> RepoResult<E>;
    /// Removes the record. Fails with `NotFound`.
    fn delete(&self, id: EntityId) -> RepoResult<()>;
    /// Applies `change` to every record and returns the updated collection.
    fn update_all(&self, change: &mut dyn FnMut(&mut E)) -> RepoResult<Vec<E>>;
}

struct Collection<E> {
    records: Vec<E>,
    high_water: EntityId,
}

impl<E: Entity> Collection<E> {
    fn position(&self, id: EntityId) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    fn next_id(&mut self) -> RepoResult<EntityId> {
        self.high_water = self
            .high_water
            .checked_add(1)
            .ok_or(RepoError::IdsExhausted { kind: E::KIND })?;
        Ok(self.high_water)
    }
}

/// Process-local repository backed by a shared, lock-guarded `Vec`.
///
/// Cloning yields another handle onto the same collection.
pub struct InMemoryRepository<E> {
    storage: Arc<RwLock<Collection<E>>>,
}

impl<E> Clone for InMemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> InMemoryRepository<E> {
    /// Creates an empty repository; the first id handed out is 1.
    pub fn new() -> Self {
        Self::from_records(Vec::new())
    }

    /// Creates a repository pre-populated with `records`.
    ///
    /// Ids must already be unique (seed loading checks this). The high-water
    /// mark starts at the largest seeded id.
    pub fn from_records(records: Vec<E>) -> Self {
        let high_water = records.iter().map(|record| record.id()).max().unwrap_or(0);
        Self {
            storage: Arc::new(RwLock::new(Collection {
                records,
                high_water,
            })),
        }
    }

    /// Number of records currently stored.
    pub fn len(&self) -> RepoResult<usize> {
        let storage = self
            .storage
            .read()
            .map_err(|_| RepoError::LockPoisoned("read"))?;
        Ok(storage.records.len())
    }

    pub fn is_empty(&self) -> RepoResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl<E: Entity> EntityRepository<E> for InMemoryRepository<E> {
    fn list(&self) -> RepoResult<Vec<E>> {
        let storage = self
            .storage
            .read()
            .map_err(|_| RepoError::LockPoisoned("read"))?;
        Ok(storage.records.clone())
    }

    fn get(&self, id: EntityId) -> RepoResult<Option<E>> {
        let storage = self
            .storage
            .read()
            .map_err(|_| RepoError::LockPoisoned("read"))?;
        Ok(storage
            .records
            .iter()
            .find(|record| record.id() == id)
            .cloned())
    }

    fn insert(&self, draft: E::Draft) -> RepoResult<E> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| RepoError::LockPoisoned("write"))?;
        let id = storage.next_id()?;
        let record = E::from_draft(id, draft);
        storage.records.push(record.clone());
        Ok(record)
    }

    fn update(&self, id: EntityId, patch: E::Patch) -> RepoResult<E> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| RepoError::LockPoisoned("write"))?;
        let index = storage
            .position(id)
            .ok_or(RepoError::NotFound { kind: E::KIND, id })?;
        let record = &mut storage.records[index];
        record.apply_patch(patch);
        Ok(record.clone())
    }

    fn delete(&self, id: EntityId) -> RepoResult<()> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| RepoError::LockPoisoned("write"))?;
        let index = storage
            .position(id)
            .ok_or(RepoError::NotFound { kind: E::KIND, id })?;
        storage.records.remove(index);
        Ok(())
    }

    fn update_all(&self, change: &mut dyn FnMut(&mut E)) -> RepoResult<Vec<E>> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| RepoError::LockPoisoned("write"))?;
        storage.records.iter_mut().for_each(|record| change(record));
        Ok(storage.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityRepository, InMemoryRepository, RepoError};
    use crate::model::contact::{Contact, ContactDraft, ContactPatch, ContactStatus};
    use crate::model::entity::Entity;

    fn seeded(ids: &[i64]) -> InMemoryRepository<Contact> {
        let records = ids
            .iter()
            .map(|id| {
                Contact::from_draft(*id, ContactDraft::new(format!("c{id}"), ContactStatus::Active))
            })
            .collect();
        InMemoryRepository::from_records(records)
    }

    #[test]
    fn empty_repository_starts_ids_at_one() {
        let repo = InMemoryRepository::<Contact>::new();
        assert!(repo.is_empty().unwrap());
        let created = repo
            .insert(ContactDraft::new("first", ContactStatus::Lead))
            .unwrap();
        assert_eq!(created.id, 1);
    }

    #[test]
    fn next_id_follows_largest_seed_id_not_count() {
        let repo = seeded(&[3, 10, 7]);
        let created = repo
            .insert(ContactDraft::new("next", ContactStatus::Lead))
            .unwrap();
        assert_eq!(created.id, 11);
    }

    #[test]
    fn deleting_the_max_does_not_recycle_its_id() {
        let repo = seeded(&[1, 2]);
        repo.delete(2).unwrap();
        let created = repo
            .insert(ContactDraft::new("after delete", ContactStatus::Lead))
            .unwrap();
        assert_eq!(created.id, 3);
    }

    #[test]
    fn insert_after_max_id_fails_without_touching_the_collection() {
        let repo = seeded(&[1, i64::MAX]);
        let err = repo
            .insert(ContactDraft::new("overflow", ContactStatus::Lead))
            .unwrap_err();
        assert_eq!(err, RepoError::IdsExhausted { kind: "Contact" });
        assert_eq!(err.to_string(), "Contact ids exhausted");
        assert_eq!(repo.len().unwrap(), 2);
    }

    #[test]
    fn update_and_delete_report_kind_and_id_when_missing() {
        let repo = seeded(&[1]);
        let err = repo.update(5, ContactPatch::default()).unwrap_err();
        assert_eq!(err, RepoError::NotFound { kind: "Contact", id: 5 });
        assert_eq!(err.to_string(), "Contact not found: 5");

        let err = repo.delete(5).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn clones_share_the_same_collection() {
        let repo = seeded(&[1]);
        let handle = repo.clone();
        handle.delete(1).unwrap();
        assert!(repo.get(1).unwrap().is_none());
    }
}
