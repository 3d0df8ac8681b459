//! Repository for the `attendance` table.
//!
//! Writes go through [`AttendanceRepo::upsert`]: a single
//! `INSERT ... ON CONFLICT (student_id, date) DO UPDATE` statement, so two
//! concurrent marks for the same student and date leave exactly one row
//! holding whichever status committed last.

use clai_core::attendance::AttendanceStatus;
use clai_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::attendance::{
    Attendance, AttendanceFilter, AttendanceWithStudent, UpdateAttendance,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, date, status, created_at, updated_at";

/// Upsert keyed on `uq_attendance_student_date`.
const UPSERT: &str = "INSERT INTO attendance (student_id, date, status) \
                      VALUES ($1, $2, $3) \
                      ON CONFLICT (student_id, date) \
                      DO UPDATE SET status = EXCLUDED.status \
                      RETURNING id, student_id, date, status, created_at, updated_at";

/// Shared `WHERE` clause for [`AttendanceFilter`], binding `$1..$3`.
const FILTER_CLAUSE: &str = "WHERE ($1::BIGINT IS NULL OR a.student_id = $1) \
                               AND ($2::DATE IS NULL OR a.date = $2) \
                               AND ($3::BIGINT IS NULL OR s.pedagogue_id = $3)";

/// Provides attendance marking and listing.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Create or overwrite the attendance record for `(student_id, date)`.
    pub async fn upsert(
        pool: &PgPool,
        student_id: DbId,
        date: Date,
        status: AttendanceStatus,
    ) -> Result<Attendance, sqlx::Error> {
        sqlx::query_as::<_, Attendance>(UPSERT)
            .bind(student_id)
            .bind(date)
            .bind(status.as_str())
            .fetch_one(pool)
            .await
    }

    /// Upsert one status per student for a single date within a transaction.
    ///
    /// Either every entry is written or none is.
    pub async fn bulk_upsert(
        pool: &PgPool,
        date: Date,
        entries: &[(DbId, AttendanceStatus)],
    ) -> Result<Vec<Attendance>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut results = Vec::with_capacity(entries.len());

        for (student_id, status) in entries {
            let row = sqlx::query_as::<_, Attendance>(UPSERT)
                .bind(student_id)
                .bind(date)
                .bind(status.as_str())
                .fetch_one(&mut *tx)
                .await?;
            results.push(row);
        }

        tx.commit().await?;
        tracing::debug!(%date, count = results.len(), "Bulk attendance committed");
        Ok(results)
    }

    /// Find an attendance record by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Attendance>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attendance WHERE id = $1");
        sqlx::query_as::<_, Attendance>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of attendance records, newest date first.
    pub async fn list(
        pool: &PgPool,
        filter: &AttendanceFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AttendanceWithStudent>, sqlx::Error> {
        let query = format!(
            "SELECT a.id, a.student_id, s.name AS student_name, a.date, a.status, \
                    a.created_at, a.updated_at \
             FROM attendance a JOIN students s ON s.id = a.student_id \
             {FILTER_CLAUSE} \
             ORDER BY a.date DESC, s.name ASC \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, AttendanceWithStudent>(&query)
            .bind(filter.student_id)
            .bind(filter.date)
            .bind(filter.pedagogue_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count the attendance records matching `filter`.
    pub async fn count(pool: &PgPool, filter: &AttendanceFilter) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM attendance a JOIN students s ON s.id = a.student_id \
             {FILTER_CLAUSE}"
        );
        sqlx::query_scalar(&query)
            .bind(filter.student_id)
            .bind(filter.date)
            .bind(filter.pedagogue_id)
            .fetch_one(pool)
            .await
    }

    /// Records for the given students on one date.
    pub async fn list_for_date(
        pool: &PgPool,
        date: Date,
        student_ids: &[DbId],
    ) -> Result<Vec<Attendance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance WHERE date = $1 AND student_id = ANY($2)"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(date)
            .bind(student_ids)
            .fetch_all(pool)
            .await
    }

    /// Records for a student dated within `start..=end`, oldest first.
    pub async fn list_for_student_between(
        pool: &PgPool,
        student_id: DbId,
        start: Date,
        end: Date,
    ) -> Result<Vec<Attendance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance \
             WHERE student_id = $1 AND date BETWEEN $2 AND $3 \
             ORDER BY date ASC"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(student_id)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }

    /// The most recent records for a student, newest first.
    pub async fn list_recent_for_student(
        pool: &PgPool,
        student_id: DbId,
        limit: i64,
    ) -> Result<Vec<Attendance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance WHERE student_id = $1 \
             ORDER BY date DESC LIMIT $2"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(student_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Edit a record in place. Moving it onto a `(student_id, date)` pair
    /// that already has a record fails with a `uq_attendance_student_date`
    /// violation.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAttendance,
    ) -> Result<Option<Attendance>, sqlx::Error> {
        let query = format!(
            "UPDATE attendance SET \
                student_id = COALESCE($2, student_id), \
                date = COALESCE($3, date), \
                status = COALESCE($4, status) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(id)
            .bind(input.student_id)
            .bind(input.date)
            .bind(input.status.map(AttendanceStatus::as_str))
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attendance WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
