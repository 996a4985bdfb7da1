//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod event;

pub use event::{EventEntity, EventOccupancyEntity, EventWithOwnerEntity, RankedEventEntity};
