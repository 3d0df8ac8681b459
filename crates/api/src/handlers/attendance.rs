//! Handlers for the `/attendance` resource.
//!
//! Every write is an upsert on `(student_id, date)`; see
//! [`AttendanceRepo::upsert`]. Callers may only touch attendance of students
//! they manage.

use std::collections::{HashMap, HashSet};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use clai_core::access::{ensure_can_manage, Caller};
use clai_core::attendance::AttendanceStatus;
use clai_core::dates;
use clai_core::error::CoreError;
use clai_core::pagination::PageRequest;
use clai_core::types::{Date, DbId};
use clai_db::models::attendance::{
    Attendance, AttendanceFilter, AttendanceWithStudent, UpdateAttendance,
};
use clai_db::models::student::Student;
use clai_db::repositories::{AttendanceRepo, StudentRepo};
use clai_db::DbPool;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::student::load_managed_student;
use crate::middleware::rbac::RequireStaff;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /attendance`.
#[derive(Debug, Deserialize)]
pub struct AttendanceQuery {
    pub student_id: Option<DbId>,
    pub date: Option<Date>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Request body for `POST /attendance`.
#[derive(Debug, Deserialize)]
pub struct MarkAttendanceRequest {
    pub student_id: DbId,
    /// Defaults to today.
    pub date: Option<Date>,
    pub status: AttendanceStatus,
}

/// Query parameters for `GET /attendance/mark`.
#[derive(Debug, Deserialize)]
pub struct RosterQuery {
    pub date: Option<Date>,
    pub grade: Option<String>,
}

/// One student on the marking roster with their current status, if any.
#[derive(Debug, Serialize)]
pub struct RosterEntry {
    pub student_id: DbId,
    pub name: String,
    pub matricula: String,
    pub grade: Option<String>,
    pub status: Option<AttendanceStatus>,
    /// Display label of `status`, e.g. `"Presente"`.
    pub status_label: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct Roster {
    pub date: Date,
    pub grade: Option<String>,
    pub students: Vec<RosterEntry>,
    /// Every grade among the caller's students, for the grade picker.
    pub grades: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkEntry {
    pub student_id: DbId,
    pub status: AttendanceStatus,
}

/// Request body for `POST /attendance/mark`.
#[derive(Debug, Deserialize)]
pub struct BulkMarkRequest {
    /// Defaults to today.
    pub date: Option<Date>,
    pub entries: Vec<BulkEntry>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_managed_attendance(
    pool: &DbPool,
    caller: &Caller,
    id: DbId,
) -> AppResult<Attendance> {
    let record = AttendanceRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Attendance",
            id,
        }))?;
    load_managed_student(pool, caller, record.student_id).await?;
    Ok(record)
}

fn roster_entry(student: Student, statuses: &HashMap<DbId, AttendanceStatus>) -> RosterEntry {
    let status = statuses.get(&student.id).copied();
    RosterEntry {
        status,
        status_label: status.map(AttendanceStatus::label),
        student_id: student.id,
        name: student.name,
        matricula: student.matricula,
        grade: student.grade,
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/attendance
///
/// Newest dates first. Non-admins only see their own students' records.
pub async fn list_attendance(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Query(params): Query<AttendanceQuery>,
) -> AppResult<Json<PageResponse<AttendanceWithStudent>>> {
    let page = PageRequest::new(params.page, params.per_page, state.config.page_size);
    let filter = AttendanceFilter {
        student_id: params.student_id,
        date: params.date,
        pedagogue_id: auth.caller().owner_scope(),
    };
    let records = AttendanceRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let total = AttendanceRepo::count(&state.pool, &filter).await?;
    Ok(Json(PageResponse::new(records, page, total)))
}

/// POST /api/v1/attendance
///
/// Create or overwrite the record for `(student_id, date)`.
pub async fn mark_attendance(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Json(input): Json<MarkAttendanceRequest>,
) -> AppResult<Json<DataResponse<Attendance>>> {
    load_managed_student(&state.pool, &auth.caller(), input.student_id).await?;
    let date = input.date.unwrap_or_else(dates::today);

    let record = AttendanceRepo::upsert(&state.pool, input.student_id, date, input.status).await?;

    tracing::info!(
        user_id = auth.user_id,
        student_id = input.student_id,
        %date,
        status = %input.status,
        "Attendance marked"
    );
    Ok(Json(DataResponse { data: record }))
}

/// PUT /api/v1/attendance/{id}
///
/// Edit a record in place. Moving it onto a `(student_id, date)` pair that
/// already has a record yields 409.
pub async fn update_attendance(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAttendance>,
) -> AppResult<Json<DataResponse<Attendance>>> {
    let caller = auth.caller();
    let current = load_managed_attendance(&state.pool, &caller, id).await?;
    if let Some(student_id) = input.student_id.filter(|s| *s != current.student_id) {
        load_managed_student(&state.pool, &caller, student_id).await?;
    }

    let record = AttendanceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Attendance",
            id,
        }))?;

    tracing::info!(user_id = auth.user_id, attendance_id = id, "Attendance updated");
    Ok(Json(DataResponse { data: record }))
}

/// DELETE /api/v1/attendance/{id}
pub async fn delete_attendance(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_managed_attendance(&state.pool, &auth.caller(), id).await?;
    AttendanceRepo::delete(&state.pool, id).await?;
    tracing::info!(user_id = auth.user_id, attendance_id = id, "Attendance deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/attendance/mark
///
/// Roster of the caller's students (optionally one grade) with any status
/// already recorded for the date.
pub async fn get_roster(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Query(params): Query<RosterQuery>,
) -> AppResult<Json<DataResponse<Roster>>> {
    let scope = auth.caller().owner_scope();
    let date = params.date.unwrap_or_else(dates::today);
    let grade = params.grade.filter(|g| !g.trim().is_empty());

    let students = StudentRepo::list_roster(&state.pool, scope, grade.as_deref()).await?;
    let ids: Vec<DbId> = students.iter().map(|s| s.id).collect();
    let statuses: HashMap<DbId, AttendanceStatus> =
        AttendanceRepo::list_for_date(&state.pool, date, &ids)
            .await?
            .into_iter()
            .filter_map(|a| a.parsed_status().map(|status| (a.student_id, status)))
            .collect();
    let grades = StudentRepo::list_grades(&state.pool, scope).await?;

    Ok(Json(DataResponse {
        data: Roster {
            date,
            grade,
            students: students
                .into_iter()
                .map(|s| roster_entry(s, &statuses))
                .collect(),
            grades,
        },
    }))
}

/// POST /api/v1/attendance/mark
///
/// Upsert a batch of statuses for one date in a single transaction. Every
/// student must be managed by the caller; otherwise nothing is written.
pub async fn bulk_mark(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Json(input): Json<BulkMarkRequest>,
) -> AppResult<Json<DataResponse<Vec<Attendance>>>> {
    if input.entries.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one attendance entry is required".into(),
        )));
    }

    let caller = auth.caller();
    let ids: HashSet<DbId> = input.entries.iter().map(|e| e.student_id).collect();
    let ids: Vec<DbId> = ids.into_iter().collect();
    let students = StudentRepo::find_many(&state.pool, &ids).await?;

    if let Some(missing) = ids
        .iter()
        .find(|id| !students.iter().any(|s| s.id == **id))
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id: *missing,
        }));
    }
    for student in &students {
        ensure_can_manage(&caller, student.pedagogue_id, "student")?;
    }

    let date = input.date.unwrap_or_else(dates::today);
    let entries: Vec<(DbId, AttendanceStatus)> = input
        .entries
        .iter()
        .map(|e| (e.student_id, e.status))
        .collect();
    let records = AttendanceRepo::bulk_upsert(&state.pool, date, &entries).await?;

    tracing::info!(
        user_id = auth.user_id,
        %date,
        count = records.len(),
        "Attendance batch marked"
    );
    Ok(Json(DataResponse { data: records }))
}
