//! Notification feed service.
//!
//! # Responsibility
//! - Provide the generic CRUD contract for notifications.
//! - Add read-state helpers used by the header dropdown and the feed page.
//!
//! # Invariants
//! - `create` always yields an unread notification stamped with the current
//!   time, whatever the caller sent.
//! - `mark_all_as_read` cannot fail on missing ids and is idempotent.

use crate::config::LatencyProfile;
use crate::model::entity::EntityId;
use crate::model::notification::{Notification, NotificationDraft, NotificationPatch};
use crate::repo::entity_repo::{EntityRepository, InMemoryRepository, RepoResult};
use crate::service::entity_service::EntityService;

/// Notification service facade over repository implementations.
pub struct NotificationService<R = InMemoryRepository<Notification>> {
    inner: EntityService<Notification, R>,
}

impl<R: Clone> Clone for NotificationService<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<R: EntityRepository<Notification>> NotificationService<R> {
    pub fn new(repo: R, latency: LatencyProfile) -> Self {
        Self {
            inner: EntityService::new(repo, latency),
        }
    }

    pub async fn get_all(&self) -> RepoResult<Vec<Notification>> {
        self.inner.get_all().await
    }

    pub async fn get_by_id(&self, id: EntityId) -> RepoResult<Notification> {
        self.inner.get_by_id(id).await
    }

    /// Creates an unread notification with `created_at = now`.
    pub async fn create(&self, draft: NotificationDraft) -> RepoResult<Notification> {
        self.inner.create(draft).await
    }

    /// Merges `patch`; the stored id stays pinned to `id`.
    pub async fn update(&self, id: EntityId, patch: NotificationPatch) -> RepoResult<Notification> {
        self.inner.update(id, patch).await
    }

    pub async fn delete(&self, id: EntityId) -> RepoResult<bool> {
        self.inner.delete(id).await
    }

    pub async fn mark_as_read(&self, id: EntityId) -> RepoResult<Notification> {
        let latency = self.inner.latency().mark;
        self.inner
            .update_after(latency, id, NotificationPatch::read(true))
            .await
    }

    pub async fn mark_as_unread(&self, id: EntityId) -> RepoResult<Notification> {
        let latency = self.inner.latency().mark;
        self.inner
            .update_after(latency, id, NotificationPatch::read(false))
            .await
    }

    /// Marks every notification read and returns the whole feed.
    pub async fn mark_all_as_read(&self) -> RepoResult<Vec<Notification>> {
        let latency = self.inner.latency().mark_all;
        self.inner
            .update_all_after(latency, &mut |notification: &mut Notification| {
                notification.read = true;
            })
            .await
    }

    /// Number of unread notifications (dropdown badge).
    pub async fn unread_count(&self) -> RepoResult<usize> {
        let all = self.inner.get_all().await?;
        Ok(all.iter().filter(|notification| !notification.read).count())
    }
}
