//! Repository layer: in-memory collections and their seed snapshots.
//!
//! # Responsibility
//! - Define the data access contract used by the entity services.
//! - Keep locking and id assignment out of service orchestration.
//!
//! # Invariants
//! - Repository APIs return the semantic `NotFound` error for missing ids.
//! - Nothing here is durable; state lives for the lifetime of the process.

pub mod entity_repo;
pub mod seed;
