//! User entity model and DTOs.

use clai_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    /// Normalised 11-digit CPF.
    pub cpf: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash), joined
/// with the role name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub role_id: DbId,
    /// Resolved role name (`"admin"` or `"pedagogue"`).
    pub role: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new user. `cpf` must already be normalised.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: DbId,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<DbId>,
}
