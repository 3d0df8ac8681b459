//! Handler for the landing dashboard.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use clai_core::dates::{recent_cutoff, today, RECENT_OBSERVATION_DAYS};
use clai_db::models::calendar_event::CalendarEvent;
use clai_db::models::student::{CourseCount, StudentFilter};
use clai_db::repositories::{CalendarEventRepo, ObservationRepo, StudentRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

const UPCOMING_EVENT_LIMIT: i64 = 5;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub student_count: i64,
    pub upcoming_events: Vec<CalendarEvent>,
    /// Observations dated within the last [`RECENT_OBSERVATION_DAYS`] days.
    pub recent_observations: i64,
    pub students_per_course: Vec<CourseCount>,
}

/// GET /api/v1/dashboard
///
/// Counts cover the caller's own records, or everything for admins.
pub async fn get_dashboard(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
) -> AppResult<Json<DataResponse<Dashboard>>> {
    let scope = auth.caller().owner_scope();

    let student_count = StudentRepo::count(
        &state.pool,
        &StudentFilter {
            pedagogue_id: scope,
            ..Default::default()
        },
    )
    .await?;
    let upcoming_events =
        CalendarEventRepo::list_upcoming(&state.pool, scope, Utc::now(), UPCOMING_EVENT_LIMIT)
            .await?;
    let since = recent_cutoff(today(), RECENT_OBSERVATION_DAYS);
    let recent_observations = ObservationRepo::count_since(&state.pool, since, scope).await?;
    let students_per_course = StudentRepo::count_by_course(&state.pool, scope).await?;

    Ok(Json(DataResponse {
        data: Dashboard {
            student_count,
            upcoming_events,
            recent_observations,
            students_per_course,
        },
    }))
}
