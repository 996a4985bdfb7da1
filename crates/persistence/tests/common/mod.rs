//! Common test utilities for repository integration tests.
//!
//! These helpers run against a real PostgreSQL database named by
//! `TEST_DATABASE_URL`. When the variable is unset the tests return early.

#![allow(dead_code)]

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use domain::models::{Event, NewEvent};
use domain::services::EventService;
use fake::faker::address::en::CityName;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;
use persistence::db::run_migrations;
use persistence::repositories::EventRepository;
use sqlx::{postgres::PgPoolOptions, PgPool};

/// Tests share one database, so they take turns.
static DATABASE_LOCK: Mutex<()> = Mutex::new(());

/// A migrated, emptied database reserved for the current test.
pub struct TestDatabase {
    pub pool: PgPool,
    _guard: MutexGuard<'static, ()>,
}

impl TestDatabase {
    /// Connects, migrates and truncates the test database.
    ///
    /// Returns `None` when `TEST_DATABASE_URL` is not set.
    pub async fn setup() -> Option<Self> {
        let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
            eprintln!("TEST_DATABASE_URL not set, skipping database test");
            return None;
        };

        let guard = DATABASE_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        cleanup_all_test_data(&pool).await;

        Some(Self {
            pool,
            _guard: guard,
        })
    }

    pub fn service(&self) -> EventService<EventRepository> {
        EventService::new(EventRepository::new(self.pool.clone()))
    }
}

/// Removes all rows, resetting identity sequences.
pub async fn cleanup_all_test_data(pool: &PgPool) {
    sqlx::query("TRUNCATE participants, events, categories, users RESTART IDENTITY CASCADE")
        .execute(pool)
        .await
        .expect("Failed to truncate test tables");
}

/// Inserts a user with a unique email and returns its id.
pub async fn create_test_user(pool: &PgPool) -> i64 {
    let name: String = Name().fake();
    let email = format!("{}@test.example.com", uuid::Uuid::new_v4());

    sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (name, email, address) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&name)
    .bind(&email)
    .bind(CityName().fake::<String>())
    .fetch_one(pool)
    .await
    .expect("Failed to insert test user")
}

/// Inserts a participant row for the given event and user.
pub async fn add_participant(pool: &PgPool, event_id: i64, user_id: i64, status: bool) {
    sqlx::query("INSERT INTO participants (event_id, user_id, status) VALUES ($1, $2, $3)")
        .bind(event_id)
        .bind(user_id)
        .bind(status)
        .execute(pool)
        .await
        .expect("Failed to insert participant");
}

/// Fills `count` seats of an event with fresh users.
pub async fn fill_seats(pool: &PgPool, event_id: i64, count: usize) {
    for _ in 0..count {
        let user_id = create_test_user(pool).await;
        add_participant(pool, event_id, user_id, true).await;
    }
}

/// Event creation payload with generated text.
pub fn new_event(user_id: i64, date: DateTime<Utc>, quota: i32) -> NewEvent {
    NewEvent {
        user_id,
        category_id: None,
        image: None,
        title: Sentence(2..4).fake(),
        description: Sentence(5..10).fake(),
        location: CityName().fake(),
        date,
        quota,
    }
}

/// Creates an event through the service.
pub async fn create_test_event(
    service: &EventService<EventRepository>,
    user_id: i64,
    date: DateTime<Utc>,
    quota: i32,
) -> Event {
    service
        .create_event(new_event(user_id, date, quota))
        .await
        .expect("Failed to create test event")
}

/// Ids of the given events, in order.
pub fn ids(events: &[Event]) -> Vec<i64> {
    events.iter().map(|event| event.id).collect()
}
