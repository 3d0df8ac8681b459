//! Repository for the `observations` table.

use clai_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::observation::{CreateObservation, Observation, UpdateObservation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, student_id, author_id, date, observation_text, justification, created_at, updated_at";

/// Provides CRUD operations for observations.
pub struct ObservationRepo;

impl ObservationRepo {
    /// Insert a new observation, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateObservation,
    ) -> Result<Observation, sqlx::Error> {
        let query = format!(
            "INSERT INTO observations (student_id, author_id, date, observation_text) \
             VALUES ($1, $2, COALESCE($3, CURRENT_DATE), $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Observation>(&query)
            .bind(input.student_id)
            .bind(input.author_id)
            .bind(input.date)
            .bind(&input.observation_text)
            .fetch_one(pool)
            .await
    }

    /// Find an observation by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Observation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM observations WHERE id = $1");
        sqlx::query_as::<_, Observation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All observations for a student, newest first.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Observation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM observations WHERE student_id = $1 \
             ORDER BY date DESC, created_at DESC"
        );
        sqlx::query_as::<_, Observation>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Observations for a student dated within `start..=end`, newest first.
    pub async fn list_for_student_between(
        pool: &PgPool,
        student_id: DbId,
        start: Date,
        end: Date,
    ) -> Result<Vec<Observation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM observations \
             WHERE student_id = $1 AND date BETWEEN $2 AND $3 \
             ORDER BY date DESC, created_at DESC"
        );
        sqlx::query_as::<_, Observation>(&query)
            .bind(student_id)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }

    /// Count observations dated on or after `since`, optionally restricted to
    /// the students of one pedagogue.
    pub async fn count_since(
        pool: &PgPool,
        since: Date,
        pedagogue_id: Option<DbId>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM observations o \
             JOIN students s ON s.id = o.student_id \
             WHERE o.date >= $1 \
               AND ($2::BIGINT IS NULL OR s.pedagogue_id = $2)",
        )
        .bind(since)
        .bind(pedagogue_id)
        .fetch_one(pool)
        .await
    }

    /// Replace the text (and optionally the date) of an observation,
    /// recording the justification.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateObservation,
    ) -> Result<Option<Observation>, sqlx::Error> {
        let query = format!(
            "UPDATE observations SET \
                date = COALESCE($2, date), \
                observation_text = $3, \
                justification = COALESCE($4, justification) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Observation>(&query)
            .bind(id)
            .bind(input.date)
            .bind(&input.observation_text)
            .bind(&input.justification)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete an observation. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM observations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
