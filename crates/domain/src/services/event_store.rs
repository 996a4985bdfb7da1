//! Storage abstraction the event engine reads from and writes to.

use shared::pagination::Page;

use crate::models::{Event, EventChanges, EventWithOwner, NewEvent, RankedEvent};
use crate::services::availability::EventOccupancy;

/// Access to event rows and their participant counts.
///
/// Implementations evaluate time-based filters against their own clock
/// (`NOW()` for the Postgres store) so a single query sees one consistent
/// instant. Errors are returned as produced by the driver; callers decide how
/// to surface them.
#[async_trait::async_trait]
pub trait EventStore: Send + Sync {
    /// Event, its participant-row count, and the store's current time.
    async fn find_occupancy(&self, event_id: i64) -> Result<Option<EventOccupancy>, sqlx::Error>;

    async fn find_by_id(&self, event_id: i64) -> Result<Option<Event>, sqlx::Error>;

    /// Event joined with its owner's public profile, regardless of availability.
    async fn find_with_owner(&self, event_id: i64) -> Result<Option<EventWithOwner>, sqlx::Error>;

    /// Events open for registration, soonest first.
    async fn list_available(&self) -> Result<Vec<Event>, sqlx::Error>;

    /// Every event, newest-created first, windowed by `page`.
    async fn list_page(&self, page: Page) -> Result<Vec<Event>, sqlx::Error>;

    /// Upcoming events whose title or location contains `keyword`, ignoring case.
    async fn search_upcoming(&self, keyword: &str) -> Result<Vec<Event>, sqlx::Error>;

    async fn list_owned_by(&self, user_id: i64) -> Result<Vec<Event>, sqlx::Error>;

    /// Events where `user_id` holds a confirmed participant row.
    async fn list_participating(&self, user_id: i64) -> Result<Vec<Event>, sqlx::Error>;

    /// Upcoming events with participants, by participant count descending,
    /// then event id ascending.
    async fn list_most_attended(&self, limit: i64) -> Result<Vec<RankedEvent>, sqlx::Error>;

    async fn insert(&self, event: &NewEvent) -> Result<Event, sqlx::Error>;

    /// Overwrites every mutable field. Returns `None` when no row has `event_id`.
    async fn update(
        &self,
        event_id: i64,
        changes: &EventChanges,
    ) -> Result<Option<Event>, sqlx::Error>;

    /// Returns the number of rows deleted (0 or 1).
    async fn delete(&self, event_id: i64) -> Result<u64, sqlx::Error>;
}
