//! CRM domain model.
//!
//! # Responsibility
//! - Define the five record types served by the entity services.
//! - Define the create (`*Draft`) and update (`*Patch`) input shapes.
//!
//! # Invariants
//! - Every record is identified by an integer `Id` assigned by the repository.
//! - Foreign keys (`contact_id`) are plain integers and never validated here.
//! - Enum fields carry no transition rules; any value may follow any other.

use serde::{Deserialize, Deserializer};

pub mod activity;
pub mod contact;
pub mod deal;
pub mod entity;
pub mod notification;
pub mod task;

/// Deserializes a present value (including `null`) as `Some(..)`.
///
/// Paired with `#[serde(default)]` on `Option<Option<T>>` patch fields so a
/// missing key means "keep" and an explicit `null` means "clear".
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
