//! The two staff roles.

use clai_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Seeded with `admin` (id 1) and `pedagogue` (id 2).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
