//! Handler for per-student reports over a date range.

use axum::extract::{Path, Query, State};
use axum::Json;
use clai_core::dates::parse_iso_date;
use clai_core::error::CoreError;
use clai_core::report::{summarize, AttendanceBreakdown, ReportWindow, Summary};
use clai_core::types::{Date, DbId};
use clai_db::models::observation::Observation;
use clai_db::models::student::Student;
use clai_db::repositories::{AttendanceRepo, DailyLogRepo, ObservationRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::handlers::student::load_managed_student;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /reports/students/{id}`. Both dates are
/// required, formatted `YYYY-MM-DD`.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AttendanceReport {
    #[serde(flatten)]
    pub summary: Summary,
    pub breakdown: AttendanceBreakdown,
}

#[derive(Debug, Serialize)]
pub struct StudentReport {
    pub student: Student,
    pub window: ReportWindow,
    pub observation_summary: Summary,
    pub attendance: AttendanceReport,
    pub daily_log_summary: Summary,
    /// Observations inside the window, newest first.
    pub observations: Vec<Observation>,
}

fn required_date(raw: Option<&str>, field: &str) -> Result<Date, CoreError> {
    let raw = raw
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| CoreError::Validation(format!("{field} is required")))?;
    parse_iso_date(raw).map_err(|e| CoreError::Validation(format!("{field}: {e}")))
}

/// GET /api/v1/reports/students/{id}?start_date=&end_date=
///
/// 400 when a date is missing or malformed, or `end_date < start_date`.
pub async fn student_report(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
    Path(student_id): Path<DbId>,
    Query(params): Query<ReportQuery>,
) -> AppResult<Json<DataResponse<StudentReport>>> {
    let start = required_date(params.start_date.as_deref(), "start_date")?;
    let end = required_date(params.end_date.as_deref(), "end_date")?;
    let window = ReportWindow::new(student_id, start, end)?;

    let student = load_managed_student(&state.pool, &auth.caller(), student_id).await?;

    let observations =
        ObservationRepo::list_for_student_between(&state.pool, student_id, start, end).await?;
    let attendance =
        AttendanceRepo::list_for_student_between(&state.pool, student_id, start, end).await?;
    let daily_logs =
        DailyLogRepo::list_for_student_between(&state.pool, student_id, start, end).await?;

    let observation_summary = summarize(observations.iter().map(|o| o.date), &window);
    let attendance_summary = summarize(attendance.iter().map(|a| a.date), &window);
    let breakdown = AttendanceBreakdown::tally(
        attendance
            .iter()
            .filter_map(|a| a.parsed_status().map(|s| (a.date, s))),
        &window,
    );
    let daily_log_summary = summarize(daily_logs.iter().map(|d| d.date), &window);

    tracing::debug!(
        user_id = auth.user_id,
        student_id,
        %start,
        %end,
        observations = observation_summary.total_count,
        "Report generated"
    );

    Ok(Json(DataResponse {
        data: StudentReport {
            student,
            window,
            observation_summary,
            attendance: AttendanceReport {
                summary: attendance_summary,
                breakdown,
            },
            daily_log_summary,
            observations,
        },
    }))
}
