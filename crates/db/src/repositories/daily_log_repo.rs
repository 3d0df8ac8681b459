//! Repository for the `daily_logs` table.

use clai_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::daily_log::{CreateDailyLog, DailyLog, DailyLogFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "d.id, d.student_id, d.author_id, d.date, d.shift, d.activity_type, \
                       d.difficulties, d.actions_taken, d.participants, d.created_at, d.updated_at";

/// Shared `WHERE` clause for [`DailyLogFilter`], binding `$1..$2`. A scoped
/// caller sees logs they wrote and logs about students assigned to them.
const FILTER_CLAUSE: &str = "WHERE ($1::BIGINT IS NULL OR d.student_id = $1) \
                               AND ($2::BIGINT IS NULL OR d.author_id = $2 OR s.pedagogue_id = $2)";

/// Provides CRUD operations for daily logs.
pub struct DailyLogRepo;

impl DailyLogRepo {
    /// Insert a new log, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDailyLog) -> Result<DailyLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO daily_logs AS d (student_id, author_id, date, shift, activity_type, \
                 difficulties, actions_taken, participants) \
             VALUES ($1, $2, COALESCE($3, CURRENT_DATE), $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DailyLog>(&query)
            .bind(input.student_id)
            .bind(input.author_id)
            .bind(input.date)
            .bind(&input.shift)
            .bind(&input.activity_type)
            .bind(&input.difficulties)
            .bind(&input.actions_taken)
            .bind(&input.participants)
            .fetch_one(pool)
            .await
    }

    /// Find a log by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DailyLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM daily_logs d WHERE d.id = $1");
        sqlx::query_as::<_, DailyLog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of logs, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &DailyLogFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DailyLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_logs d JOIN students s ON s.id = d.student_id \
             {FILTER_CLAUSE} \
             ORDER BY d.date DESC, d.created_at DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, DailyLog>(&query)
            .bind(filter.student_id)
            .bind(filter.owner_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count the logs matching `filter`.
    pub async fn count(pool: &PgPool, filter: &DailyLogFilter) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM daily_logs d JOIN students s ON s.id = d.student_id \
             {FILTER_CLAUSE}"
        );
        sqlx::query_scalar(&query)
            .bind(filter.student_id)
            .bind(filter.owner_id)
            .fetch_one(pool)
            .await
    }

    /// Logs for a student dated within `start..=end`, oldest first.
    pub async fn list_for_student_between(
        pool: &PgPool,
        student_id: DbId,
        start: Date,
        end: Date,
    ) -> Result<Vec<DailyLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_logs d \
             WHERE d.student_id = $1 AND d.date BETWEEN $2 AND $3 \
             ORDER BY d.date ASC"
        );
        sqlx::query_as::<_, DailyLog>(&query)
            .bind(student_id)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }

    /// Hard-delete a log. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM daily_logs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
