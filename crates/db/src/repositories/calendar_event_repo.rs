//! Repository for the `calendar_events` table.

use clai_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::calendar_event::{CalendarEvent, CreateCalendarEvent, UpdateCalendarEvent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, start_time, end_time, student_id, owner_id, \
                       created_at, updated_at";

/// Provides CRUD operations for calendar events.
pub struct CalendarEventRepo;

impl CalendarEventRepo {
    /// Insert a new event, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCalendarEvent,
    ) -> Result<CalendarEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO calendar_events (title, description, start_time, end_time, student_id, owner_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CalendarEvent>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.student_id)
            .bind(input.owner_id)
            .fetch_one(pool)
            .await
    }

    /// Find an event by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CalendarEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM calendar_events WHERE id = $1");
        sqlx::query_as::<_, CalendarEvent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Events overlapping `[from, to]`, ordered by start time.
    ///
    /// Either bound may be omitted; `owner_id` restricts to one user's events.
    pub async fn list(
        pool: &PgPool,
        owner_id: Option<DbId>,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
    ) -> Result<Vec<CalendarEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM calendar_events \
             WHERE ($1::BIGINT IS NULL OR owner_id = $1) \
               AND ($2::TIMESTAMPTZ IS NULL OR end_time >= $2) \
               AND ($3::TIMESTAMPTZ IS NULL OR start_time <= $3) \
             ORDER BY start_time ASC, id ASC"
        );
        sqlx::query_as::<_, CalendarEvent>(&query)
            .bind(owner_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// The next `limit` events starting at or after `now`.
    pub async fn list_upcoming(
        pool: &PgPool,
        owner_id: Option<DbId>,
        now: Timestamp,
        limit: i64,
    ) -> Result<Vec<CalendarEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM calendar_events \
             WHERE start_time >= $1 \
               AND ($2::BIGINT IS NULL OR owner_id = $2) \
             ORDER BY start_time ASC \
             LIMIT $3"
        );
        sqlx::query_as::<_, CalendarEvent>(&query)
            .bind(now)
            .bind(owner_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update an event. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCalendarEvent,
    ) -> Result<Option<CalendarEvent>, sqlx::Error> {
        let query = format!(
            "UPDATE calendar_events SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                start_time = COALESCE($4, start_time), \
                end_time = COALESCE($5, end_time), \
                student_id = COALESCE($6, student_id) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CalendarEvent>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.student_id)
            .fetch_optional(pool)
            .await
    }

    /// Move an event (drag-and-drop rescheduling).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn reschedule(
        pool: &PgPool,
        id: DbId,
        start_time: Timestamp,
        end_time: Timestamp,
    ) -> Result<Option<CalendarEvent>, sqlx::Error> {
        let query = format!(
            "UPDATE calendar_events SET start_time = $2, end_time = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CalendarEvent>(&query)
            .bind(id)
            .bind(start_time)
            .bind(end_time)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete an event. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM calendar_events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
