//! Event domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::user::EventOwner;

/// Represents an event in the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
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

impl Event {
    /// Whether the event has already started at `now`.
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        now >= self.date
    }

    /// Seats still free given the current participant count.
    pub fn remaining_seats(&self, participant_count: i64) -> i64 {
        (i64::from(self.quota) - participant_count).max(0)
    }
}

/// An event together with its owner's public profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWithOwner {
    #[serde(flatten)]
    pub event: Event,
    pub owner: EventOwner,
}

/// An event paired with how many participant rows reference it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEvent {
    #[serde(flatten)]
    pub event: Event,
    pub participant_count: i64,
}

/// Request payload for creating an event.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub user_id: i64,

    pub category_id: Option<i64>,

    #[validate(length(max = 2048, message = "Image reference must be at most 2048 characters"))]
    #[validate(custom(function = "shared::validation::validate_image_ref"))]
    pub image: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub title: String,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: String,

    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub location: String,

    pub date: DateTime<Utc>,

    #[validate(range(min = 1, message = "Quota must be at least 1"))]
    pub quota: i32,
}

/// Full replacement of an event's mutable fields.
///
/// `user_id` is the acting user; it must match the event's owner.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    pub id: i64,

    pub user_id: i64,

    pub category_id: Option<i64>,

    #[validate(length(max = 2048, message = "Image reference must be at most 2048 characters"))]
    #[validate(custom(function = "shared::validation::validate_image_ref"))]
    pub image: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub title: String,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: String,

    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub location: String,

    pub date: DateTime<Utc>,

    #[validate(range(min = 1, message = "Quota must be at least 1"))]
    pub quota: i32,
}

impl UpdateEvent {
    /// Field values the store writes, without the identifying keys.
    pub fn changes(&self) -> EventChanges {
        EventChanges {
            category_id: self.category_id,
            image: self.image.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            date: self.date,
            quota: self.quota,
        }
    }
}

/// The mutable field set of an event, as written by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct EventChanges {
    pub category_id: Option<i64>,
    pub image: Option<String>,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub quota: i32,
}

/// Partial edit of an event; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    pub category_id: Option<i64>,
    pub image: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub quota: Option<i32>,
}

impl EventPatch {
    /// Merges the patch over `current`, producing a full update for `user_id`.
    pub fn merge(self, current: &Event, user_id: i64) -> UpdateEvent {
        UpdateEvent {
            id: current.id,
            user_id,
            category_id: self.category_id.or(current.category_id),
            image: self.image.or_else(|| current.image.clone()),
            title: self.title.unwrap_or_else(|| current.title.clone()),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone()),
            location: self.location.unwrap_or_else(|| current.location.clone()),
            date: self.date.unwrap_or(current.date),
            quota: self.quota.unwrap_or(current.quota),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category_id.is_none()
            && self.image.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.date.is_none()
            && self.quota.is_none()
    }
}
