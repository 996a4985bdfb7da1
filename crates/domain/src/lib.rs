//! Domain layer for the event planner backend.
//!
//! This crate contains:
//! - Domain models (Event, Participant, EventOwner)
//! - The availability engine and the store abstraction it runs on
//! - Domain error types

pub mod error;
pub mod models;
pub mod services;

pub use error::EventError;
