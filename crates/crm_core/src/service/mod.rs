//! Async use-case services.
//!
//! # Responsibility
//! - Wrap repositories in the asynchronous, latency-simulating contract
//!   consumed by views.
//! - Keep callers decoupled from locking and id assignment.

pub mod entity_service;
pub mod notification_service;
