//! In-memory event store for development and testing.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use shared::pagination::Page;
use tokio::sync::RwLock;

use crate::models::{
    Event, EventChanges, EventOwner, EventWithOwner, NewEvent, Participant, RankedEvent,
};
use crate::services::availability::{is_open, EventOccupancy};
use crate::services::event_store::EventStore;

/// Event store backed by process memory.
///
/// Mirrors the Postgres store's query semantics, including its ordering and
/// tie-breaks. The clock can be pinned and advanced so time-dependent
/// behavior is reproducible. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventStore {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    owners: BTreeMap<i64, EventOwner>,
    events: BTreeMap<i64, Event>,
    participants: Vec<Participant>,
    last_event_id: i64,
    last_participant_id: i64,
    clock: Option<DateTime<Utc>>,
    unavailable: bool,
}

impl MemoryState {
    fn now(&self) -> DateTime<Utc> {
        self.clock.unwrap_or_else(Utc::now)
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.unavailable {
            tracing::warn!("In-memory event store simulating an outage");
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }

    fn participant_count(&self, event_id: i64) -> i64 {
        self.participants
            .iter()
            .filter(|p| p.event_id == event_id)
            .count() as i64
    }
}

impl InMemoryEventStore {
    /// Create an empty store that follows the wall clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store whose clock is pinned at `now`.
    pub fn with_clock(now: DateTime<Utc>) -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState {
                clock: Some(now),
                ..Default::default()
            })),
        }
    }

    /// Current time as seen by the store.
    pub async fn now(&self) -> DateTime<Utc> {
        self.state.read().await.now()
    }

    /// Pin the store clock at `now`.
    pub async fn set_now(&self, now: DateTime<Utc>) {
        self.state.write().await.clock = Some(now);
    }

    /// Move the store clock forward, pinning it if it was following the wall clock.
    pub async fn advance(&self, by: Duration) {
        let mut state = self.state.write().await;
        let now = state.now();
        state.clock = Some(now + by);
    }

    /// Make every subsequent call fail as if the pool were exhausted.
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.state.write().await.unavailable = unavailable;
    }

    /// Register an owner profile so events can be joined to it.
    pub async fn add_owner(&self, owner: EventOwner) {
        self.state.write().await.owners.insert(owner.id, owner);
    }

    /// Record a participant row, replacing the status of an existing one for
    /// the same user and event.
    pub async fn add_participant(&self, event_id: i64, user_id: i64, status: bool) -> Participant {
        let mut state = self.state.write().await;
        let now = state.now();

        if let Some(existing) = state
            .participants
            .iter_mut()
            .find(|p| p.event_id == event_id && p.user_id == user_id)
        {
            existing.status = status;
            return existing.clone();
        }

        state.last_participant_id += 1;
        let participant = Participant {
            id: state.last_participant_id,
            event_id,
            user_id,
            status,
            created_at: now,
        };
        state.participants.push(participant.clone());
        participant
    }

    pub async fn participant_count(&self, event_id: i64) -> i64 {
        self.state.read().await.participant_count(event_id)
    }
}

#[async_trait::async_trait]
impl EventStore for InMemoryEventStore {
    async fn find_occupancy(&self, event_id: i64) -> Result<Option<EventOccupancy>, sqlx::Error> {
        let state = self.state.read().await;
        state.check()?;

        Ok(state.events.get(&event_id).map(|event| EventOccupancy {
            event: event.clone(),
            participant_count: state.participant_count(event_id),
            observed_at: state.now(),
        }))
    }

    async fn find_by_id(&self, event_id: i64) -> Result<Option<Event>, sqlx::Error> {
        let state = self.state.read().await;
        state.check()?;

        Ok(state.events.get(&event_id).cloned())
    }

    async fn find_with_owner(&self, event_id: i64) -> Result<Option<EventWithOwner>, sqlx::Error> {
        let state = self.state.read().await;
        state.check()?;

        let joined = state.events.get(&event_id).and_then(|event| {
            state.owners.get(&event.user_id).map(|owner| EventWithOwner {
                event: event.clone(),
                owner: owner.clone(),
            })
        });
        Ok(joined)
    }

    async fn list_available(&self) -> Result<Vec<Event>, sqlx::Error> {
        let state = self.state.read().await;
        state.check()?;
        let now = state.now();

        let mut events: Vec<Event> = state
            .events
            .values()
            .filter(|e| is_open(e.date, state.participant_count(e.id), e.quota, now))
            .cloned()
            .collect();
        events.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(events)
    }

    async fn list_page(&self, page: Page) -> Result<Vec<Event>, sqlx::Error> {
        let state = self.state.read().await;
        state.check()?;

        let mut events: Vec<Event> = state.events.values().cloned().collect();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(events[page.bounds(events.len())].to_vec())
    }

    async fn search_upcoming(&self, keyword: &str) -> Result<Vec<Event>, sqlx::Error> {
        let state = self.state.read().await;
        state.check()?;
        let now = state.now();
        let needle = keyword.to_lowercase();

        let mut events: Vec<Event> = state
            .events
            .values()
            .filter(|e| now < e.date)
            .filter(|e| {
                e.title.to_lowercase().contains(&needle)
                    || e.location.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        events.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(events)
    }

    async fn list_owned_by(&self, user_id: i64) -> Result<Vec<Event>, sqlx::Error> {
        let state = self.state.read().await;
        state.check()?;

        Ok(state
            .events
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_participating(&self, user_id: i64) -> Result<Vec<Event>, sqlx::Error> {
        let state = self.state.read().await;
        state.check()?;

        let mut events: Vec<Event> = state
            .participants
            .iter()
            .filter(|p| p.user_id == user_id && p.is_confirmed())
            .filter_map(|p| state.events.get(&p.event_id))
            .cloned()
            .collect();
        events.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(events)
    }

    async fn list_most_attended(&self, limit: i64) -> Result<Vec<RankedEvent>, sqlx::Error> {
        let state = self.state.read().await;
        state.check()?;
        let now = state.now();

        let mut ranked: Vec<RankedEvent> = state
            .events
            .values()
            .filter(|e| now < e.date)
            .map(|e| RankedEvent {
                event: e.clone(),
                participant_count: state.participant_count(e.id),
            })
            .filter(|r| r.participant_count > 0)
            .collect();
        ranked.sort_by(|a, b| {
            b.participant_count
                .cmp(&a.participant_count)
                .then(a.event.id.cmp(&b.event.id))
        });
        ranked.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(ranked)
    }

    async fn insert(&self, event: &NewEvent) -> Result<Event, sqlx::Error> {
        let mut state = self.state.write().await;
        state.check()?;
        let now = state.now();

        state.last_event_id += 1;
        let stored = Event {
            id: state.last_event_id,
            user_id: event.user_id,
            category_id: event.category_id,
            image: event.image.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            date: event.date,
            quota: event.quota,
            created_at: now,
            updated_at: now,
        };
        state.events.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        event_id: i64,
        changes: &EventChanges,
    ) -> Result<Option<Event>, sqlx::Error> {
        let mut state = self.state.write().await;
        state.check()?;
        let now = state.now();

        let Some(event) = state.events.get_mut(&event_id) else {
            return Ok(None);
        };

        event.category_id = changes.category_id;
        event.image = changes.image.clone();
        event.title = changes.title.clone();
        event.description = changes.description.clone();
        event.location = changes.location.clone();
        event.date = changes.date;
        event.quota = changes.quota;
        event.updated_at = now.max(event.updated_at + Duration::microseconds(1));
        Ok(Some(event.clone()))
    }

    async fn delete(&self, event_id: i64) -> Result<u64, sqlx::Error> {
        let mut state = self.state.write().await;
        state.check()?;

        if state.events.remove(&event_id).is_none() {
            return Ok(0);
        }
        state.participants.retain(|p| p.event_id != event_id);
        Ok(1)
    }
}
