//! Handlers for the `/daily-logs` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use clai_core::access::{can_manage, ensure_can_manage, Caller};
use clai_core::daily_log::{join_shifts, validate_activity, validate_notes, ACTIVITY_CHOICES};
use clai_core::error::CoreError;
use clai_core::pagination::PageRequest;
use clai_core::types::{Date, DbId};
use clai_db::models::daily_log::{CreateDailyLog, DailyLog, DailyLogFilter};
use clai_db::repositories::DailyLogRepo;
use clai_db::DbPool;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::student::{load_managed_student, load_student};
use crate::middleware::rbac::RequireStaff;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Query parameters for `GET /daily-logs`.
#[derive(Debug, Deserialize)]
pub struct DailyLogQuery {
    pub student_id: Option<DbId>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Request body for `POST /daily-logs`.
#[derive(Debug, Deserialize)]
pub struct CreateDailyLogRequest {
    pub student_id: DbId,
    /// Defaults to today.
    pub date: Option<Date>,
    /// One or more of the known shifts.
    pub shifts: Vec<String>,
    pub activity_type: String,
    pub difficulties: Option<String>,
    pub actions_taken: Option<String>,
    pub participants: Option<String>,
}

/// An activity choice for the log form.
#[derive(Debug, Serialize)]
pub struct ActivityChoice {
    pub key: &'static str,
    pub label: &'static str,
}

/// A log is visible to its author and to whoever manages the student.
async fn load_visible_log(pool: &DbPool, caller: &Caller, id: DbId) -> AppResult<DailyLog> {
    let log = DailyLogRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DailyLog",
            id,
        }))?;
    if log.author_id != caller.user_id {
        let student = load_student(pool, log.student_id).await?;
        if !can_manage(caller, student.pedagogue_id) {
            return Err(AppError::Core(CoreError::Forbidden(
                "You do not have permission to access this daily log".into(),
            )));
        }
    }
    Ok(log)
}

/// GET /api/v1/daily-logs
///
/// Newest first. Non-admins see logs they wrote or that concern their
/// students.
pub async fn list_daily_logs(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Query(params): Query<DailyLogQuery>,
) -> AppResult<Json<PageResponse<DailyLog>>> {
    let page = PageRequest::new(params.page, params.per_page, state.config.page_size);
    let filter = DailyLogFilter {
        student_id: params.student_id,
        owner_id: auth.caller().owner_scope(),
    };
    let logs = DailyLogRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let total = DailyLogRepo::count(&state.pool, &filter).await?;
    Ok(Json(PageResponse::new(logs, page, total)))
}

/// POST /api/v1/daily-logs
pub async fn create_daily_log(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Json(input): Json<CreateDailyLogRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<DailyLog>>)> {
    let shift = join_shifts(&input.shifts).map_err(CoreError::Validation)?;
    validate_activity(&input.activity_type).map_err(CoreError::Validation)?;
    validate_notes(
        input.difficulties.as_deref(),
        input.actions_taken.as_deref(),
        input.participants.as_deref(),
    )
    .map_err(CoreError::Validation)?;

    load_managed_student(&state.pool, &auth.caller(), input.student_id).await?;

    let log = DailyLogRepo::create(
        &state.pool,
        &CreateDailyLog {
            student_id: input.student_id,
            author_id: auth.user_id,
            date: input.date,
            shift,
            activity_type: input.activity_type,
            difficulties: input.difficulties,
            actions_taken: input.actions_taken,
            participants: input.participants,
        },
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        student_id = log.student_id,
        daily_log_id = log.id,
        "Daily log created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: log })))
}

/// GET /api/v1/daily-logs/{id}
pub async fn get_daily_log(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DailyLog>>> {
    let log = load_visible_log(&state.pool, &auth.caller(), id).await?;
    Ok(Json(DataResponse { data: log }))
}

/// DELETE /api/v1/daily-logs/{id}
///
/// Only the author or an admin may delete a log.
pub async fn delete_daily_log(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let caller = auth.caller();
    let log = load_visible_log(&state.pool, &caller, id).await?;
    ensure_can_manage(&caller, Some(log.author_id), "daily log")?;
    DailyLogRepo::delete(&state.pool, id).await?;
    tracing::info!(user_id = auth.user_id, daily_log_id = id, "Daily log deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/daily-logs/activities
pub async fn list_activities(
    RequireStaff(_auth): RequireStaff,
) -> Json<DataResponse<Vec<ActivityChoice>>> {
    let choices = ACTIVITY_CHOICES
        .iter()
        .map(|&(key, label)| ActivityChoice { key, label })
        .collect();
    Json(DataResponse { data: choices })
}
