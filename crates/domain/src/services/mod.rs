//! Domain services for the event planner.
//!
//! Services contain business logic that operates on domain models.

pub mod availability;
pub mod event_service;
pub mod event_store;
pub mod in_memory_store;

pub use availability::{is_open, Availability, EventOccupancy, UnavailableReason};
pub use event_service::{EventService, EventServiceSettings, TOP_ATTENDED_LIMIT};
pub use event_store::EventStore;
pub use in_memory_store::InMemoryEventStore;
