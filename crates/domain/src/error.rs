//! Error taxonomy for event operations.

use shared::pagination::PageError;
use thiserror::Error;

/// Errors surfaced by the event engine.
#[derive(Debug, Error)]
pub enum EventError {
    /// No event matches the key, or the event is not open for registration
    /// when asked through `check_available`.
    #[error("Event {0} not found")]
    NotFound(i64),

    #[error("User {user_id} does not own event {event_id}")]
    Forbidden { event_id: i64, user_id: i64 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(sqlx::Error),

    /// A row came back in a shape that could not be materialised.
    #[error("Malformed row: {0}")]
    Scan(String),
}

impl EventError {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            EventError::NotFound(_) => "not_found",
            EventError::Forbidden { .. } => "forbidden",
            EventError::Validation(_) => "validation_error",
            EventError::Store(_) => "store_error",
            EventError::Scan(_) => "scan_error",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, EventError::NotFound(_))
    }
}

impl From<sqlx::Error> for EventError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::TypeNotFound { .. } => EventError::Scan(err.to_string()),
            other => EventError::Store(other),
        }
    }
}

impl From<validator::ValidationErrors> for EventError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| match &e.message {
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        messages.sort();

        EventError::Validation(messages.join(", "))
    }
}

impl From<PageError> for EventError {
    fn from(err: PageError) -> Self {
        EventError::Validation(err.to_string())
    }
}
