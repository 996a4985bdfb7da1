//! Runtime wiring for the event planner: configuration, logging and the
//! database-backed availability engine.

pub mod bootstrap;
pub mod config;
pub mod logging;
