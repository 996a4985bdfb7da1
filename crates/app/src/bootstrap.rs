//! Wires configuration, the database pool and the availability engine.

use domain::models::RankedEvent;
use domain::services::{EventService, EventServiceSettings, EventStore};
use domain::EventError;
use persistence::db::{create_pool, run_migrations};
use persistence::metrics::record_pool_metrics;
use persistence::repositories::EventRepository;
use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::info;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Failed to run migrations: {0}")]
    Migrate(#[from] MigrateError),
}

/// Connects to Postgres, applies migrations and builds the event service.
pub async fn build_event_service(
    config: &Config,
) -> Result<EventService<EventRepository>, BootstrapError> {
    let pool_config = persistence::db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&pool_config)
        .await
        .map_err(BootstrapError::Connect)?;

    info!("Running database migrations...");
    run_migrations(&pool).await?;
    record_pool_metrics(&pool);

    let settings = EventServiceSettings {
        page_limits: config.listing.page_limits(),
    };
    Ok(EventService::with_settings(
        EventRepository::new(pool),
        settings,
    ))
}

/// Point-in-time view of what is open for registration.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilitySnapshot {
    pub open_events: usize,
    pub top_attended: Vec<RankedEvent>,
}

/// Reads the open events and the attendance ranking.
pub async fn availability_snapshot<S: EventStore>(
    service: &EventService<S>,
) -> Result<AvailabilitySnapshot, EventError> {
    let open_events = service.list_available_events().await?.len();
    let top_attended = service.top_attended_events().await?;

    info!(
        open_events,
        top_attended = top_attended.len(),
        "Availability snapshot"
    );
    for ranked in &top_attended {
        info!(
            event_id = ranked.event.id,
            title = %ranked.event.title,
            participants = ranked.participant_count,
            remaining_seats = ranked.event.remaining_seats(ranked.participant_count),
            "Top attended event"
        );
    }

    Ok(AvailabilitySnapshot {
        open_events,
        top_attended,
    })
}
