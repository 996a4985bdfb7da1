//! Event entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{Event, EventOwner, EventWithOwner, RankedEvent};
use domain::services::EventOccupancy;

/// Database row mapping for the events table.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: i64,
    pub user_id: i64,
    pub category_id: Option<i64>,
    pub image: Option<String>,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub quota: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventEntity> for Event {
    fn from(entity: EventEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            category_id: entity.category_id,
            image: entity.image,
            title: entity.title,
            description: entity.description,
            location: entity.location,
            date: entity.date,
            quota: entity.quota,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Event row with its participant count and the database clock.
#[derive(Debug, Clone, FromRow)]
pub struct EventOccupancyEntity {
    #[sqlx(flatten)]
    pub event: EventEntity,
    pub participant_count: i64,
    pub observed_at: DateTime<Utc>,
}

impl From<EventOccupancyEntity> for EventOccupancy {
    fn from(entity: EventOccupancyEntity) -> Self {
        Self {
            event: entity.event.into(),
            participant_count: entity.participant_count,
            observed_at: entity.observed_at,
        }
    }
}

/// Event row joined with the owner's public profile columns.
#[derive(Debug, Clone, FromRow)]
pub struct EventWithOwnerEntity {
    #[sqlx(flatten)]
    pub event: EventEntity,
    pub owner_id: i64,
    pub owner_avatar: Option<String>,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_address: Option<String>,
    pub owner_occupation: Option<String>,
    pub owner_phone: Option<String>,
}

impl From<EventWithOwnerEntity> for EventWithOwner {
    fn from(entity: EventWithOwnerEntity) -> Self {
        Self {
            event: entity.event.into(),
            owner: EventOwner {
                id: entity.owner_id,
                avatar: entity.owner_avatar,
                name: entity.owner_name,
                email: entity.owner_email,
                address: entity.owner_address,
                occupation: entity.owner_occupation,
                phone: entity.owner_phone,
            },
        }
    }
}

/// Event row with its participant count, as produced by the ranking query.
#[derive(Debug, Clone, FromRow)]
pub struct RankedEventEntity {
    #[sqlx(flatten)]
    pub event: EventEntity,
    pub participant_count: i64,
}

impl From<RankedEventEntity> for RankedEvent {
    fn from(entity: RankedEventEntity) -> Self {
        Self {
            event: entity.event.into(),
            participant_count: entity.participant_count,
        }
    }
}
