//! Persistence layer for the event planner backend.
//!
//! This crate contains:
//! - Database connection management and migrations
//! - Entity definitions (database row mappings)
//! - The Postgres implementation of the event store
//! - Query metrics

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
