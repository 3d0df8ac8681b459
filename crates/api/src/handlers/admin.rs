//! Handlers for the `/admin` resource (staff account management).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use clai_core::error::CoreError;
use clai_core::identifier::Cpf;
use clai_core::roles::validate_role;
use clai_core::types::DbId;
use clai_core::user::{
    validate_institutional_email, validate_password_confirmation, validate_password_strength,
};
use clai_db::models::user::{CreateUser, UpdateUser, UserResponse};
use clai_db::repositories::{RoleRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::PageParams;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    /// CPF in any punctuation; stored normalised.
    pub cpf: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// `"admin"` or `"pedagogue"`.
    pub role: String,
}

/// Request body for `PUT /admin/users/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Request body for `POST /admin/users/{id}/password`.
#[derive(Debug, Deserialize)]
pub struct SetPasswordRequest {
    pub new_password: String,
    pub confirm_new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/users
///
/// Create a staff account. Returns the safe [`UserResponse`] with 201 Created.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    input.validate()?;
    let cpf = Cpf::parse(&input.cpf)?;
    validate_institutional_email(&input.email).map_err(CoreError::Validation)?;
    validate_password_strength(&input.password).map_err(CoreError::Validation)?;
    validate_password_confirmation(&input.password, &input.confirm_password)
        .map_err(CoreError::Validation)?;
    let role_id = resolve_role_id(&state, &input.role).await?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name.trim().to_string(),
            cpf: cpf.as_str().to_string(),
            email: input.email,
            password_hash,
            role_id,
        },
    )
    .await?;

    tracing::info!(admin_id = admin.user_id, user_id = user.id, role = %input.role, "User created");

    let response = load_response(&state, user.id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// GET /api/v1/admin/users
///
/// List staff accounts ordered by name, one page at a time.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PageParams>,
) -> AppResult<Json<PageResponse<UserResponse>>> {
    let page = params.resolve(state.config.page_size);
    let users = UserRepo::list(&state.pool, page.limit(), page.offset()).await?;
    let total = UserRepo::count(&state.pool).await?;
    Ok(Json(PageResponse::new(users, page, total)))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let response = load_response(&state, id).await?;
    Ok(Json(DataResponse { data: response }))
}

/// PUT /api/v1/admin/users/{id}
///
/// Update name, CPF, email or role. Passwords are changed separately.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input.validate()?;
    let cpf = input.cpf.as_deref().map(Cpf::parse).transpose()?;
    if let Some(email) = &input.email {
        validate_institutional_email(email).map_err(CoreError::Validation)?;
    }
    let role_id = match &input.role {
        Some(role) => Some(resolve_role_id(&state, role).await?),
        None => None,
    };

    let update = UpdateUser {
        name: input.name.map(|n| n.trim().to_string()),
        cpf: cpf.map(String::from),
        email: input.email,
        role_id,
    };
    UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(admin_id = admin.user_id, user_id = id, "User updated");

    let response = load_response(&state, id).await?;
    Ok(Json(DataResponse { data: response }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Hard-delete an account. Admins cannot delete themselves.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Conflict(
            "You cannot delete your own account".into(),
        )));
    }
    if !UserRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    tracing::info!(admin_id = admin.user_id, user_id = id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/{id}/password
///
/// Set another user's password without knowing the old one.
pub async fn set_password(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password).map_err(CoreError::Validation)?;
    validate_password_confirmation(&input.new_password, &input.confirm_new_password)
        .map_err(CoreError::Validation)?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    if !UserRepo::update_password(&state.pool, id, &hashed).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    tracing::info!(admin_id = admin.user_id, user_id = id, "Password set by admin");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn resolve_role_id(state: &AppState, role: &str) -> AppResult<DbId> {
    validate_role(role).map_err(CoreError::Validation)?;
    let role = RoleRepo::find_by_name(&state.pool, role)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Role '{role}' is not seeded")))?;
    Ok(role.id)
}

async fn load_response(state: &AppState, id: DbId) -> AppResult<UserResponse> {
    UserRepo::find_response_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}
