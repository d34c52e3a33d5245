//! Event repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::event::{
    CreateEventRequest, CreateGuestRequest, Event, EventGuest, UpdateEventRequest,
};
use crate::utils::errors::AppError;

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, AppError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, event_type, status, date, location, budget, attendees_count, organizer_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, title, description, event_type, status, date, location, budget, attendees_count, organizer_id, created_at, updated_at
            "#,
        )
        .bind(request.title)
        .bind(request.description.unwrap_or_default())
        .bind(request.event_type)
        .bind(request.status.unwrap_or_else(|| "planning".to_string()))
        .bind(request.date)
        .bind(request.location)
        .bind(request.budget)
        .bind(request.attendees_count.unwrap_or(0))
        .bind(request.organizer_id)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, AppError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, event_type, status, date, location, budget, attendees_count, organizer_id, created_at, updated_at FROM events WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Update event
    pub async fn update(&self, id: i64, request: UpdateEventRequest) -> Result<Event, AppError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                event_type = COALESCE($4, event_type),
                status = COALESCE($5, status),
                date = COALESCE($6, date),
                location = COALESCE($7, location),
                budget = COALESCE($8, budget),
                attendees_count = COALESCE($9, attendees_count),
                updated_at = $10
            WHERE id = $1
            RETURNING id, title, description, event_type, status, date, location, budget, attendees_count, organizer_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.event_type)
        .bind(request.status)
        .bind(request.date)
        .bind(request.location)
        .bind(request.budget)
        .bind(request.attendees_count)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Delete event. Guests and media rows referencing it are removed by
    /// the ON DELETE CASCADE constraints.
    pub async fn delete(&self, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// List events, newest first
    pub async fn list(&self) -> Result<Vec<Event>, AppError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, event_type, status, date, location, budget, attendees_count, organizer_id, created_at, updated_at FROM events ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Add a guest to an event
    pub async fn add_guest(
        &self,
        event_id: i64,
        request: CreateGuestRequest,
    ) -> Result<EventGuest, AppError> {
        let guest = sqlx::query_as::<_, EventGuest>(
            r#"
            INSERT INTO event_guests (event_id, name, email, phone, rsvp_status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, event_id, name, email, phone, rsvp_status, created_at
            "#,
        )
        .bind(event_id)
        .bind(request.name)
        .bind(request.email)
        .bind(request.phone)
        .bind(request.rsvp_status.unwrap_or_else(|| "pending".to_string()))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(guest)
    }

    /// Remove a guest from an event
    pub async fn delete_guest(&self, event_id: i64, guest_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM event_guests WHERE id = $1 AND event_id = $2")
            .bind(guest_id)
            .bind(event_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Guests of one event, oldest first
    pub async fn guests_for_event(&self, event_id: i64) -> Result<Vec<EventGuest>, AppError> {
        let guests = sqlx::query_as::<_, EventGuest>(
            "SELECT id, event_id, name, email, phone, rsvp_status, created_at FROM event_guests WHERE event_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(guests)
    }

    /// Guests of many events in one query. Used when listing events so the
    /// guest lists can be attached without a query per event.
    pub async fn guests_for_events(&self, event_ids: &[i64]) -> Result<Vec<EventGuest>, AppError> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }

        let guests = sqlx::query_as::<_, EventGuest>(
            "SELECT id, event_id, name, email, phone, rsvp_status, created_at FROM event_guests WHERE event_id = ANY($1) ORDER BY event_id ASC, created_at ASC, id ASC",
        )
        .bind(event_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(guests)
    }

    /// Count total events
    pub async fn count(&self) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
