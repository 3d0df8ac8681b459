//! Lookups against the seeded `roles` table.

use clai_core::types::DbId;
use sqlx::PgPool;

use crate::models::role::Role;

const COLUMNS: &str = "id, name, created_at, updated_at";

pub struct RoleRepo;

impl RoleRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE id = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// `"admin"` or `"pedagogue"` to its row, for the `role` field of user forms.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE name = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Role name for a user's `role_id`. `users.role_id` is a foreign key, so
    /// a miss only happens if the row vanished mid-request; that caller gets
    /// `"unknown"`, which no role gate accepts.
    pub async fn resolve_name(pool: &PgPool, role_id: DbId) -> Result<String, sqlx::Error> {
        let role = Self::find_by_id(pool, role_id).await?;
        Ok(role.map_or_else(|| "unknown".to_string(), |r| r.name))
    }
}
