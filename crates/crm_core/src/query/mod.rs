//! Read-side helpers composed over `get_all` results.
//!
//! # Responsibility
//! - Provide the search, filter, sort and aggregate views the pages build
//!   from full collections.
//! - Resolve foreign keys leniently: dangling ids become display fallbacks.
//!
//! # Invariants
//! - Pure functions over borrowed slices; nothing here touches the store.
//! - Output order is deterministic for equal sort keys (input order is kept).

pub mod dashboard;
pub mod filters;
