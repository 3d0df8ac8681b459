//! First-run administrator provisioning.

use clai_core::error::CoreError;
use clai_core::identifier::Cpf;
use clai_core::roles::ROLE_ADMIN;
use clai_core::user::validate_password_strength;
use clai_db::models::user::CreateUser;
use clai_db::repositories::{RoleRepo, UserRepo};
use clai_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};

/// Create the configured administrator unless an account with that email
/// already exists. Returns `true` when a user was created.
pub async fn ensure_bootstrap_admin(pool: &DbPool, admin: &BootstrapAdmin) -> AppResult<bool> {
    if UserRepo::find_by_email(pool, &admin.email).await?.is_some() {
        return Ok(false);
    }

    let cpf = Cpf::parse(&admin.cpf)?;
    validate_password_strength(&admin.password).map_err(CoreError::Validation)?;

    let role = RoleRepo::find_by_name(pool, ROLE_ADMIN)
        .await?
        .ok_or_else(|| AppError::InternalError("Admin role is not seeded".into()))?;
    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: "Administrator".to_string(),
            cpf: cpf.into(),
            email: admin.email.clone(),
            password_hash,
            role_id: role.id,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "Bootstrap administrator created");
    Ok(true)
}
