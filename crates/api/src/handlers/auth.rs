//! Login, refresh-token rotation and logout.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use clai_core::access::Caller;
use clai_core::error::CoreError;
use clai_core::types::DbId;
use clai_db::models::session::CreateSession;
use clai_db::models::user::User;
use clai_db::repositories::{RoleRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{hash_refresh_token, issue_access_token, RefreshToken};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address or CPF (punctuation allowed).
    #[validate(length(min = 1, message = "Email or CPF is required"))]
    pub login_id: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub role: String,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid login or password".into(),
    ))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with an email or CPF plus password. Unknown logins and wrong
/// passwords produce the same 401 so accounts cannot be enumerated.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    input.validate()?;

    let user = UserRepo::find_by_login(&state.pool, &input.login_id)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Rejected login with wrong password");
        return Err(invalid_credentials());
    }

    let role_name = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    let refresh = RefreshToken::generate();
    SessionRepo::create(&state.pool, &new_session(&state, user.id, &refresh)).await?;
    let response = auth_response(&state, &user, &role_name, refresh)?;

    tracing::info!(user_id = user.id, role = %role_name, "User logged in");
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Trade a live refresh token for a new pair. The presented token is revoked
/// in the same transaction that stores its successor, so it works only once.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let expired = || AppError::Core(CoreError::Unauthorized("Invalid or expired refresh token".into()));

    let session =
        SessionRepo::find_by_refresh_token_hash(&state.pool, &hash_refresh_token(&input.refresh_token))
            .await?
            .ok_or_else(expired)?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    let role_name = RoleRepo::resolve_name(&state.pool, user.role_id).await?;

    let next = RefreshToken::generate();
    SessionRepo::rotate(&state.pool, session.id, &new_session(&state, user.id, &next))
        .await?
        .ok_or_else(expired)?;

    Ok(Json(auth_response(&state, &user, &role_name, next)?))
}

/// POST /api/v1/auth/logout
///
/// Revoke every session of the caller. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth.user_id).await?;
    tracing::info!(user_id = auth.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_session(state: &AppState, user_id: DbId, token: &RefreshToken) -> CreateSession {
    CreateSession {
        user_id,
        refresh_token_hash: token.hash.clone(),
        expires_at: state.config.jwt.refresh_expires_at(),
    }
}

/// Sign an access token for `user` and pair it with `refresh`.
fn auth_response(
    state: &AppState,
    user: &User,
    role: &str,
    refresh: RefreshToken,
) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let access_token = issue_access_token(&Caller::new(user.id, role), jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh.plaintext,
        expires_in: jwt.access_ttl_secs(),
        user: UserInfo {
            id: user.id,
            name: user.name.clone(),
            cpf: user.cpf.clone(),
            email: user.email.clone(),
            role: role.to_string(),
        },
    })
}
