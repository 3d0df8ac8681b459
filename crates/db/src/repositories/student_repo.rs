//! Repository for the `students` table.
//!
//! Listing queries take an optional pedagogue scope: `None` returns every
//! student (admins), `Some(id)` only the students assigned to that user.

use clai_core::types::DbId;
use sqlx::PgPool;

use crate::models::student::{CourseCount, CreateStudent, Student, StudentFilter, UpdateStudent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, matricula, dob, cid, email, phone, grade, course, \
                       responsible_name, responsible_phone, responsible_email, \
                       specific_needs_description, pedagogue_id, created_at, updated_at";

/// Shared `WHERE` clause for [`StudentFilter`], binding `$1..$3`.
const FILTER_CLAUSE: &str = "WHERE ($1::TEXT IS NULL OR name ILIKE $1 OR matricula ILIKE $1) \
                               AND ($2::BIGINT IS NULL OR pedagogue_id = $2) \
                               AND ($3::TEXT IS NULL OR grade = $3)";

/// Provides CRUD and listing operations for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStudent) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (name, matricula, dob, cid, email, phone, grade, course, \
                 responsible_name, responsible_phone, responsible_email, \
                 specific_needs_description, pedagogue_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&input.name)
            .bind(&input.matricula)
            .bind(input.dob)
            .bind(&input.cid)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.grade)
            .bind(&input.course)
            .bind(&input.responsible_name)
            .bind(&input.responsible_phone)
            .bind(&input.responsible_email)
            .bind(&input.specific_needs_description)
            .bind(input.pedagogue_id)
            .fetch_one(pool)
            .await
    }

    /// Find a student by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find several students at once, in no particular order. Missing IDs
    /// are simply absent from the result.
    pub async fn find_many(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = ANY($1)");
        sqlx::query_as::<_, Student>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List one page of students matching `filter`, ordered by name.
    pub async fn list(
        pool: &PgPool,
        filter: &StudentFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM students {FILTER_CLAUSE} \
             ORDER BY name ASC, id ASC \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&filter.pattern)
            .bind(filter.pedagogue_id)
            .bind(&filter.grade)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count the students matching `filter`.
    pub async fn count(pool: &PgPool, filter: &StudentFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM students {FILTER_CLAUSE}");
        sqlx::query_scalar(&query)
            .bind(&filter.pattern)
            .bind(filter.pedagogue_id)
            .bind(&filter.grade)
            .fetch_one(pool)
            .await
    }

    /// Every student in scope, optionally restricted to one grade, ordered
    /// by name. Used for the attendance roster.
    pub async fn list_roster(
        pool: &PgPool,
        pedagogue_id: Option<DbId>,
        grade: Option<&str>,
    ) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM students \
             WHERE ($1::BIGINT IS NULL OR pedagogue_id = $1) \
               AND ($2::TEXT IS NULL OR grade = $2) \
             ORDER BY name ASC, id ASC"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(pedagogue_id)
            .bind(grade)
            .fetch_all(pool)
            .await
    }

    /// Distinct non-empty grades among the students in scope.
    pub async fn list_grades(
        pool: &PgPool,
        pedagogue_id: Option<DbId>,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT grade FROM students \
             WHERE grade IS NOT NULL AND grade <> '' \
               AND ($1::BIGINT IS NULL OR pedagogue_id = $1) \
             ORDER BY grade ASC",
        )
        .bind(pedagogue_id)
        .fetch_all(pool)
        .await
    }

    /// Student counts grouped by course. Students without a course are
    /// grouped under an empty string.
    pub async fn count_by_course(
        pool: &PgPool,
        pedagogue_id: Option<DbId>,
    ) -> Result<Vec<CourseCount>, sqlx::Error> {
        sqlx::query_as::<_, CourseCount>(
            "SELECT COALESCE(course, '') AS course, COUNT(*) AS total FROM students \
             WHERE ($1::BIGINT IS NULL OR pedagogue_id = $1) \
             GROUP BY COALESCE(course, '') \
             ORDER BY total DESC, course ASC",
        )
        .bind(pedagogue_id)
        .fetch_all(pool)
        .await
    }

    /// Update a student. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStudent,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET \
                name = COALESCE($2, name), \
                matricula = COALESCE($3, matricula), \
                dob = COALESCE($4, dob), \
                cid = COALESCE($5, cid), \
                email = COALESCE($6, email), \
                phone = COALESCE($7, phone), \
                grade = COALESCE($8, grade), \
                course = COALESCE($9, course), \
                responsible_name = COALESCE($10, responsible_name), \
                responsible_phone = COALESCE($11, responsible_phone), \
                responsible_email = COALESCE($12, responsible_email), \
                specific_needs_description = COALESCE($13, specific_needs_description), \
                pedagogue_id = COALESCE($14, pedagogue_id) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.matricula)
            .bind(input.dob)
            .bind(&input.cid)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.grade)
            .bind(&input.course)
            .bind(&input.responsible_name)
            .bind(&input.responsible_phone)
            .bind(&input.responsible_email)
            .bind(&input.specific_needs_description)
            .bind(input.pedagogue_id)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a student; observations, attendance and logs cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
