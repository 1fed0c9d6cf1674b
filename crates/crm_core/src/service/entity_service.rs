//! Generic entity use-case service.
//!
//! # Responsibility
//! - Expose the async CRUD contract (`get_all`, `get_by_id`, `create`,
//!   `update`, `delete`) over any `EntityRepository`.
//! - Model a remote round-trip: every call waits its configured latency
//!   before it reads or mutates state.
//!
//! # Invariants
//! - State is touched only after the delay has elapsed, in one repository
//!   call, so each operation is atomic but concurrent callers are
//!   last-write-wins.
//! - Returned records are owned copies.

use crate::config::LatencyProfile;
use crate::model::entity::{Entity, EntityId};
use crate::repo::entity_repo::{EntityRepository, InMemoryRepository, RepoError, RepoResult};
use log::{debug, info, warn};
use std::marker::PhantomData;
use std::time::{Duration, Instant};

/// Async CRUD façade for one entity type.
pub struct EntityService<E, R = InMemoryRepository<E>> {
    repo: R,
    latency: LatencyProfile,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R: Clone> Clone for EntityService<E, R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            latency: self.latency,
            _entity: PhantomData,
        }
    }
}

impl<E: Entity, R: EntityRepository<E>> EntityService<E, R> {
    /// Creates a service using the provided repository and latency profile.
    pub fn new(repo: R, latency: LatencyProfile) -> Self {
        Self {
            repo,
            latency,
            _entity: PhantomData,
        }
    }

    pub fn latency(&self) -> &LatencyProfile {
        &self.latency
    }

    /// Returns the whole collection in insertion order.
    pub async fn get_all(&self) -> RepoResult<Vec<E>> {
        let started_at = Instant::now();
        simulate_latency(self.latency.get_all).await;
        let records = self.repo.list()?;
        debug!(
            "event=entity_list module=service kind={} status=ok count={} duration_ms={}",
            E::KIND,
            records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(records)
    }

    /// Returns one record, or `NotFound`.
    pub async fn get_by_id(&self, id: EntityId) -> RepoResult<E> {
        let started_at = Instant::now();
        simulate_latency(self.latency.get_by_id).await;
        let result = self
            .repo
            .get(id)
            .and_then(|found| found.ok_or(RepoError::NotFound { kind: E::KIND, id }));
        log_outcome::<E, _>("entity_get", id, started_at, &result);
        result
    }

    /// Appends a new record with the next id and returns it.
    pub async fn create(&self, draft: E::Draft) -> RepoResult<E> {
        let started_at = Instant::now();
        simulate_latency(self.latency.create).await;
        let created = self.repo.insert(draft)?;
        info!(
            "event=entity_create module=service kind={} status=ok id={} duration_ms={}",
            E::KIND,
            created.id(),
            started_at.elapsed().as_millis()
        );
        Ok(created)
    }

    /// Merges `patch` onto the record. The id never changes.
    pub async fn update(&self, id: EntityId, patch: E::Patch) -> RepoResult<E> {
        self.update_after(self.latency.update, id, patch).await
    }

    /// Removes the record. Dependent records in other collections are kept.
    pub async fn delete(&self, id: EntityId) -> RepoResult<bool> {
        let started_at = Instant::now();
        simulate_latency(self.latency.delete).await;
        let result = self.repo.delete(id).map(|()| true);
        log_outcome::<E, _>("entity_delete", id, started_at, &result);
        result
    }

    pub(crate) async fn update_after(
        &self,
        latency: Duration,
        id: EntityId,
        patch: E::Patch,
    ) -> RepoResult<E> {
        let started_at = Instant::now();
        simulate_latency(latency).await;
        let result = self.repo.update(id, patch);
        log_outcome::<E, _>("entity_update", id, started_at, &result);
        result
    }

    pub(crate) async fn update_all_after(
        &self,
        latency: Duration,
        change: &mut (dyn FnMut(&mut E) + Send),
    ) -> RepoResult<Vec<E>> {
        let started_at = Instant::now();
        simulate_latency(latency).await;
        let records = self.repo.update_all(change)?;
        info!(
            "event=entity_update_all module=service kind={} status=ok count={} duration_ms={}",
            E::KIND,
            records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(records)
    }
}

async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

fn log_outcome<E: Entity, T>(
    event: &str,
    id: EntityId,
    started_at: Instant,
    result: &RepoResult<T>,
) {
    match result {
        Ok(_) => debug!(
            "event={} module=service kind={} status=ok id={} duration_ms={}",
            event,
            E::KIND,
            id,
            started_at.elapsed().as_millis()
        ),
        Err(err) if err.is_not_found() => warn!(
            "event={} module=service kind={} status=error id={} error_code=not_found duration_ms={}",
            event,
            E::KIND,
            id,
            started_at.elapsed().as_millis()
        ),
        Err(err) => warn!(
            "event={} module=service kind={} status=error id={} error={} duration_ms={}",
            event,
            E::KIND,
            id,
            err,
            started_at.elapsed().as_millis()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::EntityService;
    use crate::config::LatencyProfile;
    use crate::model::activity::{Activity, ActivityDraft, ActivityPatch, ActivityType};
    use crate::repo::entity_repo::{InMemoryRepository, RepoError};
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    fn draft(subject: &str) -> ActivityDraft {
        ActivityDraft {
            subject: subject.to_string(),
            notes: String::new(),
            kind: ActivityType::Call,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            contact_id: 1,
        }
    }

    fn service(latency: LatencyProfile) -> EntityService<Activity> {
        EntityService::new(InMemoryRepository::new(), latency)
    }

    #[tokio::test(start_paused = true)]
    async fn each_call_waits_its_configured_latency() {
        let mut latency = LatencyProfile::instant();
        latency.create = Duration::from_millis(300);
        latency.get_by_id = Duration::from_millis(200);
        let service = service(latency);

        let started = tokio::time::Instant::now();
        let created = service.create(draft("intro call")).await.unwrap();
        let after_create = started.elapsed();
        assert!(after_create >= Duration::from_millis(300));
        assert!(after_create < Duration::from_millis(350));

        service.get_by_id(created.id).await.unwrap();
        let after_get = started.elapsed();
        assert!(after_get >= Duration::from_millis(500));
        assert!(after_get < Duration::from_millis(550));
    }

    #[tokio::test]
    async fn not_found_failures_are_symmetric() {
        let service = service(LatencyProfile::instant());
        let expected = RepoError::NotFound {
            kind: "Activity",
            id: 42,
        };

        assert_eq!(service.get_by_id(42).await.unwrap_err(), expected);
        assert_eq!(
            service
                .update(42, ActivityPatch::default())
                .await
                .unwrap_err(),
            expected
        );
        assert_eq!(service.delete(42).await.unwrap_err(), expected);
    }

    #[tokio::test(start_paused = true)]
    async fn racing_updates_are_last_write_wins() {
        let mut latency = LatencyProfile::instant();
        latency.update = Duration::from_millis(300);
        let service = service(latency);
        let id = service.create(draft("original")).await.unwrap().id;

        let slow = service.clone();
        let first = tokio::spawn(async move {
            slow.update(
                id,
                ActivityPatch {
                    subject: Some("first".to_string()),
                    ..ActivityPatch::default()
                },
            )
            .await
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = service.update(
            id,
            ActivityPatch {
                subject: Some("second".to_string()),
                ..ActivityPatch::default()
            },
        );

        let (first, second) = tokio::join!(first, second);
        first.unwrap().unwrap();
        second.unwrap();
        let stored = service.get_by_id(id).await.unwrap();
        assert_eq!(stored.subject, "second");
    }
}
