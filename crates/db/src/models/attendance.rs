//! Attendance entity model and DTOs.

use clai_core::attendance::AttendanceStatus;
use clai_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `attendance` table. At most one per `(student_id, date)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attendance {
    pub id: DbId,
    pub student_id: DbId,
    pub date: Date,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Attendance {
    /// Parsed status. `None` only if the row predates the status check.
    pub fn parsed_status(&self) -> Option<AttendanceStatus> {
        self.status.parse().ok()
    }
}

/// An attendance row joined with the student's name, for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceWithStudent {
    pub id: DbId,
    pub student_id: DbId,
    pub student_name: String,
    pub date: Date,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for editing an attendance row in place.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAttendance {
    pub student_id: Option<DbId>,
    pub date: Option<Date>,
    pub status: Option<AttendanceStatus>,
}

/// Filters for paginated attendance listing.
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    pub student_id: Option<DbId>,
    pub date: Option<Date>,
    /// Restrict to students of this pedagogue.
    pub pedagogue_id: Option<DbId>,
}
