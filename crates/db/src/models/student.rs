//! Student entity model and DTOs.

use clai_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `students` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub name: String,
    pub matricula: String,
    pub dob: Date,
    /// ICD code of the student's condition, when known.
    pub cid: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub grade: Option<String>,
    pub course: Option<String>,
    pub responsible_name: Option<String>,
    pub responsible_phone: Option<String>,
    pub responsible_email: Option<String>,
    pub specific_needs_description: Option<String>,
    /// Owning pedagogue; `None` means only admins can manage the record.
    pub pedagogue_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a student.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudent {
    pub name: String,
    pub matricula: String,
    pub dob: Date,
    pub cid: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub grade: Option<String>,
    pub course: Option<String>,
    pub responsible_name: Option<String>,
    pub responsible_phone: Option<String>,
    pub responsible_email: Option<String>,
    pub specific_needs_description: Option<String>,
    pub pedagogue_id: Option<DbId>,
}

/// DTO for updating a student. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStudent {
    pub name: Option<String>,
    pub matricula: Option<String>,
    pub dob: Option<Date>,
    pub cid: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub grade: Option<String>,
    pub course: Option<String>,
    pub responsible_name: Option<String>,
    pub responsible_phone: Option<String>,
    pub responsible_email: Option<String>,
    pub specific_needs_description: Option<String>,
    pub pedagogue_id: Option<DbId>,
}

/// Filters for paginated student listing.
#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    /// `ILIKE` pattern matched against name and matrícula.
    pub pattern: Option<String>,
    /// Restrict to students of this pedagogue.
    pub pedagogue_id: Option<DbId>,
    pub grade: Option<String>,
}

/// Number of students per course, for the dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseCount {
    pub course: String,
    pub total: i64,
}
