//! Event owner profile.

use serde::{Deserialize, Serialize};

/// Public profile fields of the user that owns an event.
///
/// Users are managed elsewhere; this is the read-only projection joined into
/// event detail views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOwner {
    pub id: i64,
    pub avatar: Option<String>,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub occupation: Option<String>,
    pub phone: Option<String>,
}
