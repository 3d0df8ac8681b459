//! Daily log entity model and DTOs.

use clai_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `daily_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyLog {
    pub id: DbId,
    pub student_id: DbId,
    pub author_id: DbId,
    pub date: Date,
    /// Shifts joined with `", "` in canonical order.
    pub shift: String,
    pub activity_type: String,
    pub difficulties: Option<String>,
    pub actions_taken: Option<String>,
    pub participants: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a daily log. `date` defaults to today.
#[derive(Debug, Clone)]
pub struct CreateDailyLog {
    pub student_id: DbId,
    pub author_id: DbId,
    pub date: Option<Date>,
    pub shift: String,
    pub activity_type: String,
    pub difficulties: Option<String>,
    pub actions_taken: Option<String>,
    pub participants: Option<String>,
}

/// Filters for paginated daily log listing.
#[derive(Debug, Clone, Default)]
pub struct DailyLogFilter {
    pub student_id: Option<DbId>,
    /// Restrict to logs written by this user or about their students.
    pub owner_id: Option<DbId>,
}
