//! Shared utilities and common types for the event planner backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Offset pagination windows
//! - Common validation logic

pub mod pagination;
pub mod validation;
