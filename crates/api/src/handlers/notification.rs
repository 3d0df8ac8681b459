//! In-app notifications: the caller's inbox and the [`notify`] helper other
//! handlers use to write to someone else's.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use clai_core::error::CoreError;
use clai_core::pagination::PageRequest;
use clai_core::types::DbId;
use clai_db::models::notification::Notification;
use clai_db::repositories::NotificationRepo;
use clai_db::DbPool;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    #[serde(default)]
    pub unread_only: bool,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub unread: i64,
}

#[derive(Debug, Serialize)]
pub struct MarkedRead {
    pub updated: u64,
}

/// Drop a message in `recipient_id`'s inbox. Runs after the triggering write
/// has committed; a failure is logged and the request still succeeds.
pub async fn notify(pool: &DbPool, recipient_id: DbId, message: &str, link: Option<&str>) {
    if let Err(e) = NotificationRepo::create(pool, recipient_id, message, link).await {
        tracing::warn!(recipient_id, link, error = %e, "Notification was not delivered");
    }
}

/// GET /api/v1/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<NotificationQuery>,
) -> AppResult<Json<PageResponse<Notification>>> {
    let page = PageRequest::new(params.page, params.per_page, state.config.page_size);
    let items = NotificationRepo::list_for_user(
        &state.pool,
        auth.user_id,
        params.unread_only,
        page.limit(),
        page.offset(),
    )
    .await?;
    let total = NotificationRepo::count_for_user(&state.pool, auth.user_id, params.unread_only)
        .await?;
    Ok(Json(PageResponse::new(items, page, total)))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    let unread = NotificationRepo::count_for_user(&state.pool, auth.user_id, true).await?;
    Ok(Json(DataResponse {
        data: UnreadCount { unread },
    }))
}

/// POST /api/v1/notifications/{id}/read
///
/// Unknown, foreign or already-read notifications are reported as not found.
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !NotificationRepo::mark_read(&state.pool, id, auth.user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<MarkedRead>>> {
    let updated = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: MarkedRead { updated },
    }))
}
