//! Availability predicate.
//!
//! An event accepts participants iff its date is strictly in the future and
//! its participant count is strictly below its quota. The result is derived at
//! read time and never stored, so it can flip purely because time passed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Event;

/// Whether an event with the given schedule and occupancy is open at `now`.
pub fn is_open(date: DateTime<Utc>, participant_count: i64, quota: i32, now: DateTime<Utc>) -> bool {
    now < date && participant_count < i64::from(quota)
}

/// An event with its participant count, observed at a point in time.
///
/// `observed_at` is the store's clock at the moment of the read.
#[derive(Debug, Clone, PartialEq)]
pub struct EventOccupancy {
    pub event: Event,
    pub participant_count: i64,
    pub observed_at: DateTime<Utc>,
}

impl EventOccupancy {
    pub fn is_open(&self) -> bool {
        is_open(
            self.event.date,
            self.participant_count,
            self.event.quota,
            self.observed_at,
        )
    }

    /// Classifies the occupancy. A started event reports `Started` even when
    /// it is also full.
    pub fn into_availability(self) -> Availability {
        let reason = if self.event.has_started(self.observed_at) {
            UnavailableReason::Started
        } else if self.participant_count >= i64::from(self.event.quota) {
            UnavailableReason::Full
        } else {
            return Availability::Available(self.event);
        };

        Availability::Unavailable {
            event: self.event,
            participant_count: self.participant_count,
            reason,
        }
    }
}

/// Why an existing event does not accept participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    Started,
    Full,
}

impl std::fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnavailableReason::Started => write!(f, "started"),
            UnavailableReason::Full => write!(f, "full"),
        }
    }
}

/// Outcome of an availability check that keeps "missing" apart from "closed".
#[derive(Debug, Clone, PartialEq)]
pub enum Availability {
    Available(Event),
    Unavailable {
        event: Event,
        participant_count: i64,
        reason: UnavailableReason,
    },
    NotFound,
}

impl Availability {
    pub fn exists(&self) -> bool {
        !matches!(self, Availability::NotFound)
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available(_))
    }

    /// Returns the event only when it is open for registration.
    pub fn into_available(self) -> Option<Event> {
        match self {
            Availability::Available(event) => Some(event),
            _ => None,
        }
    }
}
