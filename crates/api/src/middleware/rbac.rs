//! Role gates layered on top of [`AuthUser`].
//!
//! These only look at the role in the token. Whether the caller may touch a
//! particular student or record is decided in the handlers via
//! `clai_core::access`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use clai_core::access::Caller;
use clai_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticate, then reject with 403 unless `allowed` holds for the caller.
async fn authorize(
    parts: &mut Parts,
    state: &AppState,
    allowed: fn(&Caller) -> bool,
    denied: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !allowed(&user.caller()) {
        tracing::debug!(user_id = user.user_id, role = %user.role, "Role check failed");
        return Err(AppError::Core(CoreError::Forbidden(denied.to_string())));
    }
    Ok(user)
}

/// User management is admin-only.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, Caller::is_admin, "Admin role required")
            .await
            .map(RequireAdmin)
    }
}

/// Pedagogue or admin; gates every write to student records.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, Caller::is_staff, "Pedagogue or admin role required")
            .await
            .map(RequireStaff)
    }
}

/// Any valid token. Read-only views (dashboard, reports) take this.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize(parts, state, |_| true, "").await.map(RequireAuth)
    }
}
