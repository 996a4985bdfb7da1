//! Event availability engine.
//!
//! Decides at read time whether events still accept participants and serves
//! the listing, search, pagination and ranking views over the event store.
//! Capacity is never reserved: availability is a point-in-time comparison of
//! the participant count against the quota, so concurrent registrations
//! handled elsewhere can still overbook an event.

use shared::pagination::{PageLimits, PageRequest};
use tracing::{debug, info, warn};
use validator::Validate;

use crate::error::EventError;
use crate::models::{Event, EventPatch, EventWithOwner, NewEvent, RankedEvent, UpdateEvent};
use crate::services::availability::Availability;
use crate::services::event_store::EventStore;

/// Maximum number of events returned by the most-attended ranking.
pub const TOP_ATTENDED_LIMIT: i64 = 4;

/// Tunables for the listing views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventServiceSettings {
    pub page_limits: PageLimits,
}

/// Availability-aware access to events.
#[derive(Debug, Clone)]
pub struct EventService<S> {
    store: S,
    settings: EventServiceSettings,
}

impl<S: EventStore> EventService<S> {
    pub fn new(store: S) -> Self {
        Self::with_settings(store, EventServiceSettings::default())
    }

    pub fn with_settings(store: S, settings: EventServiceSettings) -> Self {
        Self { store, settings }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> EventServiceSettings {
        self.settings
    }

    /// Classifies an event as available, unavailable (with the reason), or missing.
    pub async fn check_availability(&self, event_id: i64) -> Result<Availability, EventError> {
        let availability = match self.store.find_occupancy(event_id).await? {
            Some(occupancy) => occupancy.into_availability(),
            None => Availability::NotFound,
        };

        debug!(
            event_id,
            exists = availability.exists(),
            available = availability.is_available(),
            "Checked event availability"
        );
        Ok(availability)
    }

    /// Returns the event only if it is open for registration right now.
    ///
    /// Missing, started and full events all report `NotFound`; use
    /// [`Self::check_availability`] to tell them apart.
    pub async fn check_available(&self, event_id: i64) -> Result<Event, EventError> {
        self.check_availability(event_id)
            .await?
            .into_available()
            .ok_or(EventError::NotFound(event_id))
    }

    /// Event detail with its owner's profile, whether or not it is still open.
    pub async fn get_event(&self, event_id: i64) -> Result<EventWithOwner, EventError> {
        self.store
            .find_with_owner(event_id)
            .await?
            .ok_or(EventError::NotFound(event_id))
    }

    /// Every event currently open for registration, soonest first.
    pub async fn list_available_events(&self) -> Result<Vec<Event>, EventError> {
        let events = self.store.list_available().await?;
        debug!(count = events.len(), "Listed available events");
        Ok(events)
    }

    /// Raw browse over every event, newest-created first.
    ///
    /// Unlike [`Self::list_available_events`] this applies no availability
    /// filter: full and past events are included.
    pub async fn paginate(&self, request: PageRequest) -> Result<Vec<Event>, EventError> {
        let page = request.resolve(self.settings.page_limits)?;
        let events = self.store.list_page(page).await?;
        debug!(
            limit = page.limit(),
            offset = page.offset(),
            count = events.len(),
            "Listed event page"
        );
        Ok(events)
    }

    /// Alias of [`Self::paginate`] named for the unfiltered browse view.
    pub async fn list_all(&self, request: PageRequest) -> Result<Vec<Event>, EventError> {
        self.paginate(request).await
    }

    /// Upcoming events whose title or location contains `keyword`.
    ///
    /// Fullness is not considered; latest date first.
    pub async fn search_events(&self, keyword: &str) -> Result<Vec<Event>, EventError> {
        let keyword = keyword.trim();
        let events = self.store.search_upcoming(keyword).await?;
        debug!(keyword, count = events.len(), "Searched events");
        Ok(events)
    }

    pub async fn get_own_events(&self, user_id: i64) -> Result<Vec<Event>, EventError> {
        Ok(self.store.list_owned_by(user_id).await?)
    }

    /// Events the user is confirmed for, including full and past ones.
    pub async fn get_participating_events(&self, user_id: i64) -> Result<Vec<Event>, EventError> {
        Ok(self.store.list_participating(user_id).await?)
    }

    /// Up to four upcoming events with the most participants.
    pub async fn top_attended_events(&self) -> Result<Vec<RankedEvent>, EventError> {
        let mut ranked = self.store.list_most_attended(TOP_ATTENDED_LIMIT).await?;
        ranked.truncate(TOP_ATTENDED_LIMIT as usize);
        Ok(ranked)
    }

    pub async fn create_event(&self, event: NewEvent) -> Result<Event, EventError> {
        event.validate()?;

        let created = self.store.insert(&event).await?;
        info!(
            event_id = created.id,
            user_id = created.user_id,
            quota = created.quota,
            date = %created.date,
            "Event created"
        );
        Ok(created)
    }

    /// Replaces every mutable field of an event owned by `update.user_id`.
    pub async fn update_event(&self, update: UpdateEvent) -> Result<Event, EventError> {
        update.validate()?;
        self.owned_event(update.user_id, update.id).await?;

        let updated = self
            .store
            .update(update.id, &update.changes())
            .await?
            .ok_or(EventError::NotFound(update.id))?;

        info!(
            event_id = updated.id,
            user_id = update.user_id,
            quota = updated.quota,
            "Event updated"
        );
        Ok(updated)
    }

    /// Reads the current record, applies the supplied fields, and writes the
    /// merged result as a full update.
    pub async fn patch_event(
        &self,
        user_id: i64,
        event_id: i64,
        patch: EventPatch,
    ) -> Result<Event, EventError> {
        let current = self.owned_event(user_id, event_id).await?;
        if patch.is_empty() {
            return Ok(current);
        }

        self.update_event(patch.merge(&current, user_id)).await
    }

    pub async fn delete_event(&self, user_id: i64, event_id: i64) -> Result<(), EventError> {
        self.owned_event(user_id, event_id).await?;

        if self.store.delete(event_id).await? == 0 {
            return Err(EventError::NotFound(event_id));
        }

        info!(event_id, user_id, "Event deleted");
        Ok(())
    }

    async fn owned_event(&self, user_id: i64, event_id: i64) -> Result<Event, EventError> {
        let event = self
            .store
            .find_by_id(event_id)
            .await?
            .ok_or(EventError::NotFound(event_id))?;

        if event.user_id != user_id {
            warn!(
                event_id,
                owner_id = event.user_id,
                user_id,
                "Rejected event mutation by non-owner"
            );
            return Err(EventError::Forbidden { event_id, user_id });
        }
        Ok(event)
    }
}
