//! Observation entity model and DTOs.

use clai_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `observations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Observation {
    pub id: DbId,
    pub student_id: DbId,
    pub author_id: DbId,
    pub date: Date,
    pub observation_text: String,
    /// Reason given for the most recent edit of the text.
    pub justification: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an observation. `date` defaults to today.
#[derive(Debug, Clone)]
pub struct CreateObservation {
    pub student_id: DbId,
    pub author_id: DbId,
    pub date: Option<Date>,
    pub observation_text: String,
}

/// DTO for editing an observation.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateObservation {
    pub date: Option<Date>,
    pub observation_text: String,
    pub justification: Option<String>,
}
