//! Domain models for the event planner.

pub mod event;
pub mod participant;
pub mod user;

pub use event::{Event, EventChanges, EventPatch, EventWithOwner, NewEvent, RankedEvent, UpdateEvent};
pub use participant::Participant;
pub use user::EventOwner;
