//! Event repository for database operations.
//!
//! Time filters use the database clock (`NOW()`), so every predicate within a
//! statement is evaluated against the same instant.

use shared::pagination::Page;
use sqlx::PgPool;

use domain::models::{Event, EventChanges, EventWithOwner, NewEvent, RankedEvent};
use domain::services::{EventOccupancy, EventStore};

use crate::entities::{EventEntity, EventOccupancyEntity, EventWithOwnerEntity, RankedEventEntity};
use crate::metrics::QueryTimer;

/// Column list shared by every query that materialises an `EventEntity`.
const EVENT_COLUMNS: &str = "events.id, events.user_id, events.category_id, events.image, \
     events.title, events.description, events.location, events.date, events.quota, \
     events.created_at, events.updated_at";

/// Repository for event-related database operations.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Creates a new EventRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Builds an `ILIKE` pattern matching `keyword` anywhere, with `%`, `_` and
/// `\` in the keyword matched literally.
pub fn contains_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait::async_trait]
impl EventStore for EventRepository {
    async fn find_occupancy(&self, event_id: i64) -> Result<Option<EventOccupancy>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_occupancy");
        let result = sqlx::query_as::<_, EventOccupancyEntity>(&format!(
            r#"
            SELECT {EVENT_COLUMNS},
                   COUNT(participants.id) AS participant_count,
                   NOW() AS observed_at
            FROM events
            LEFT JOIN participants ON participants.event_id = events.id
            WHERE events.id = $1
            GROUP BY events.id
            "#
        ))
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record_result(&result);
        Ok(result?.map(Into::into))
    }

    async fn find_by_id(&self, event_id: i64) -> Result<Option<Event>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_id");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT * FROM events WHERE id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record_result(&result);
        Ok(result?.map(Into::into))
    }

    async fn find_with_owner(&self, event_id: i64) -> Result<Option<EventWithOwner>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_with_owner");
        let result = sqlx::query_as::<_, EventWithOwnerEntity>(&format!(
            r#"
            SELECT {EVENT_COLUMNS},
                   users.id AS owner_id,
                   users.avatar AS owner_avatar,
                   users.name AS owner_name,
                   users.email AS owner_email,
                   users.address AS owner_address,
                   users.occupation AS owner_occupation,
                   users.phone AS owner_phone
            FROM events
            JOIN users ON users.id = events.user_id
            WHERE events.id = $1
            "#
        ))
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record_result(&result);
        Ok(result?.map(Into::into))
    }

    async fn list_available(&self) -> Result<Vec<Event>, sqlx::Error> {
        let timer = QueryTimer::new("list_available_events");
        let result = sqlx::query_as::<_, EventEntity>(&format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM events
            LEFT JOIN participants ON participants.event_id = events.id
            WHERE NOW() < events.date
            GROUP BY events.id
            HAVING COUNT(participants.id) < events.quota
            ORDER BY events.date ASC, events.id ASC
            "#
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record_result(&result);
        Ok(result?.into_iter().map(Into::into).collect())
    }

    async fn list_page(&self, page: Page) -> Result<Vec<Event>, sqlx::Error> {
        let timer = QueryTimer::new("list_events_page");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT * FROM events
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await;
        timer.record_result(&result);
        Ok(result?.into_iter().map(Into::into).collect())
    }

    async fn search_upcoming(&self, keyword: &str) -> Result<Vec<Event>, sqlx::Error> {
        let timer = QueryTimer::new("search_upcoming_events");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT * FROM events
            WHERE NOW() < date
              AND (title ILIKE $1 OR location ILIKE $1)
            ORDER BY date DESC, id DESC
            "#,
        )
        .bind(contains_pattern(keyword))
        .fetch_all(&self.pool)
        .await;
        timer.record_result(&result);
        Ok(result?.into_iter().map(Into::into).collect())
    }

    async fn list_owned_by(&self, user_id: i64) -> Result<Vec<Event>, sqlx::Error> {
        let timer = QueryTimer::new("list_events_by_owner");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT * FROM events WHERE user_id = $1 ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record_result(&result);
        Ok(result?.into_iter().map(Into::into).collect())
    }

    async fn list_participating(&self, user_id: i64) -> Result<Vec<Event>, sqlx::Error> {
        let timer = QueryTimer::new("list_participating_events");
        let result = sqlx::query_as::<_, EventEntity>(&format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM events
            JOIN participants ON participants.event_id = events.id
            WHERE participants.status = TRUE AND participants.user_id = $1
            ORDER BY events.date ASC, events.id ASC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record_result(&result);
        Ok(result?.into_iter().map(Into::into).collect())
    }

    async fn list_most_attended(&self, limit: i64) -> Result<Vec<RankedEvent>, sqlx::Error> {
        let timer = QueryTimer::new("list_most_attended_events");
        let result = sqlx::query_as::<_, RankedEventEntity>(&format!(
            r#"
            SELECT {EVENT_COLUMNS},
                   COUNT(participants.id) AS participant_count
            FROM events
            JOIN participants ON participants.event_id = events.id
            WHERE NOW() < events.date
            GROUP BY events.id
            ORDER BY participant_count DESC, events.id ASC
            LIMIT $1
            "#
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record_result(&result);
        Ok(result?.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, event: &NewEvent) -> Result<Event, sqlx::Error> {
        let timer = QueryTimer::new("create_event");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            INSERT INTO events (user_id, category_id, image, title, description,
                                location, date, quota, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(event.user_id)
        .bind(event.category_id)
        .bind(event.image.as_deref())
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.date)
        .bind(event.quota)
        .fetch_one(&self.pool)
        .await;
        timer.record_result(&result);
        Ok(result?.into())
    }

    async fn update(
        &self,
        event_id: i64,
        changes: &EventChanges,
    ) -> Result<Option<Event>, sqlx::Error> {
        let timer = QueryTimer::new("update_event");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            UPDATE events SET
                category_id = $2,
                image = $3,
                title = $4,
                description = $5,
                location = $6,
                date = $7,
                quota = $8,
                updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond')
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(event_id)
        .bind(changes.category_id)
        .bind(changes.image.as_deref())
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.location)
        .bind(changes.date)
        .bind(changes.quota)
        .fetch_optional(&self.pool)
        .await;
        timer.record_result(&result);
        Ok(result?.map(Into::into))
    }

    async fn delete(&self, event_id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_event");
        let result = sqlx::query(
            r#"
            DELETE FROM events WHERE id = $1
            "#,
        )
        .bind(event_id)
        .execute(&self.pool)
        .await;
        timer.record_result(&result);
        Ok(result?.rows_affected())
    }
}
