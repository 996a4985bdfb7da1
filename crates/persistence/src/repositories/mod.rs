//! Repository implementations for database operations.

pub mod event;

pub use event::EventRepository;
