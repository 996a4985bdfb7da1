//! Participant domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Links a user to an event.
///
/// `status` is `true` once the registration is confirmed. Every row counts
/// against the event's quota, confirmed or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub status: bool,
    pub created_at: DateTime<Utc>,
}

impl Participant {
    pub fn is_confirmed(&self) -> bool {
        self.status
    }
}
