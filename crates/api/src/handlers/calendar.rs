//! Handlers for the `/events` resource (calendar).
//!
//! Events belong to their creator. An event may reference a student, in
//! which case the caller must also manage that student.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use clai_core::access::{ensure_can_manage, Caller};
use clai_core::calendar::{default_end, validate_event, validate_schedule};
use clai_core::error::CoreError;
use clai_core::types::{DbId, Timestamp};
use clai_db::models::calendar_event::{CalendarEvent, CreateCalendarEvent, UpdateCalendarEvent};
use clai_db::repositories::CalendarEventRepo;
use clai_db::DbPool;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::student::load_managed_student;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /events`. Returns events overlapping the range.
#[derive(Debug, Deserialize)]
pub struct EventRangeQuery {
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

/// Request body for `POST /events`.
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub start_time: Timestamp,
    /// Defaults to one hour after `start_time`.
    pub end_time: Option<Timestamp>,
    pub student_id: Option<DbId>,
}

/// Request body for `PATCH /events/{id}/schedule` (drag-and-drop moves).
#[derive(Debug, Deserialize)]
pub struct RescheduleRequest {
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_managed_event(pool: &DbPool, caller: &Caller, id: DbId) -> AppResult<CalendarEvent> {
    let event = CalendarEventRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;
    ensure_can_manage(caller, event.owner_id, "event")?;
    Ok(event)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/events
pub async fn list_events(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(range): Query<EventRangeQuery>,
) -> AppResult<Json<DataResponse<Vec<CalendarEvent>>>> {
    let events = CalendarEventRepo::list(
        &state.pool,
        auth.caller().owner_scope(),
        range.start,
        range.end,
    )
    .await?;
    Ok(Json(DataResponse { data: events }))
}

/// POST /api/v1/events
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CalendarEvent>>)> {
    let end_time = input
        .end_time
        .unwrap_or_else(|| default_end(input.start_time));
    validate_event(
        &input.title,
        input.description.as_deref(),
        input.start_time,
        end_time,
    )
    .map_err(CoreError::Validation)?;

    if let Some(student_id) = input.student_id {
        load_managed_student(&state.pool, &auth.caller(), student_id).await?;
    }

    let event = CalendarEventRepo::create(
        &state.pool,
        &CreateCalendarEvent {
            title: input.title.trim().to_string(),
            description: input.description,
            start_time: input.start_time,
            end_time,
            student_id: input.student_id,
            owner_id: auth.user_id,
        },
    )
    .await?;

    tracing::info!(user_id = auth.user_id, event_id = event.id, "Event created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// GET /api/v1/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CalendarEvent>>> {
    let event = load_managed_event(&state.pool, &auth.caller(), id).await?;
    Ok(Json(DataResponse { data: event }))
}

/// PUT /api/v1/events/{id}
///
/// The merged result is validated as a whole, so moving only the start past
/// the stored end is rejected.
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCalendarEvent>,
) -> AppResult<Json<DataResponse<CalendarEvent>>> {
    let caller = auth.caller();
    let current = load_managed_event(&state.pool, &caller, id).await?;

    let title = input.title.as_deref().unwrap_or(&current.title);
    let description = input
        .description
        .as_deref()
        .or(current.description.as_deref());
    let start = input.start_time.unwrap_or(current.start_time);
    let end = input.end_time.unwrap_or(current.end_time);
    validate_event(title, description, start, end).map_err(CoreError::Validation)?;

    if let Some(student_id) = input.student_id.filter(|s| Some(*s) != current.student_id) {
        load_managed_student(&state.pool, &caller, student_id).await?;
    }

    let event = CalendarEventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;

    tracing::info!(user_id = auth.user_id, event_id = id, "Event updated");
    Ok(Json(DataResponse { data: event }))
}

/// PATCH /api/v1/events/{id}/schedule
///
/// Move or resize an event. Without `end_time` the event keeps its length.
pub async fn reschedule_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<RescheduleRequest>,
) -> AppResult<Json<DataResponse<CalendarEvent>>> {
    let current = load_managed_event(&state.pool, &auth.caller(), id).await?;
    let end_time = input
        .end_time
        .unwrap_or(input.start_time + (current.end_time - current.start_time));
    validate_schedule(input.start_time, end_time)
        .map_err(CoreError::Validation)?;

    let event = CalendarEventRepo::reschedule(&state.pool, id, input.start_time, end_time)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;

    tracing::info!(user_id = auth.user_id, event_id = id, "Event rescheduled");
    Ok(Json(DataResponse { data: event }))
}

/// DELETE /api/v1/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_managed_event(&state.pool, &auth.caller(), id).await?;
    CalendarEventRepo::delete(&state.pool, id).await?;
    tracing::info!(user_id = auth.user_id, event_id = id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}
