//! Handlers for the `/students` resource.
//!
//! Pedagogues see and manage only their own students; admins see all and
//! may reassign a student to another pedagogue.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use clai_core::access::{ensure_can_manage, Caller};
use clai_core::error::CoreError;
use clai_core::identifier::validate_matricula;
use clai_core::pagination::PageRequest;
use clai_core::roles::ROLE_PEDAGOGUE;
use clai_core::student::{contains_pattern, normalize_search};
use clai_core::types::{Date, DbId};
use clai_db::models::attendance::Attendance;
use clai_db::models::observation::Observation;
use clai_db::models::student::{CreateStudent, Student, StudentFilter, UpdateStudent};
use clai_db::repositories::{AttendanceRepo, ObservationRepo, RoleRepo, StudentRepo, UserRepo};
use clai_db::DbPool;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::notification::notify;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Attendance rows shown on the student detail page.
const DETAIL_ATTENDANCE_LIMIT: i64 = 30;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /students`.
#[derive(Debug, Deserialize)]
pub struct StudentQuery {
    /// Substring of the name or matrícula.
    pub search: Option<String>,
    pub grade: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Request body for `POST /students`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    pub matricula: String,
    pub dob: Date,
    #[validate(length(max = 50))]
    pub cid: Option<String>,
    #[validate(email, length(max = 120))]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 20))]
    pub grade: Option<String>,
    #[validate(length(max = 50))]
    pub course: Option<String>,
    #[validate(length(max = 100))]
    pub responsible_name: Option<String>,
    #[validate(length(max = 20))]
    pub responsible_phone: Option<String>,
    #[validate(email, length(max = 120))]
    pub responsible_email: Option<String>,
    pub specific_needs_description: Option<String>,
    /// Only honoured for admins; pedagogues always own what they create.
    pub pedagogue_id: Option<DbId>,
}

/// Request body for `PUT /students/{id}`. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStudentRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    pub matricula: Option<String>,
    pub dob: Option<Date>,
    #[validate(length(max = 50))]
    pub cid: Option<String>,
    #[validate(email, length(max = 120))]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 20))]
    pub grade: Option<String>,
    #[validate(length(max = 50))]
    pub course: Option<String>,
    #[validate(length(max = 100))]
    pub responsible_name: Option<String>,
    #[validate(length(max = 20))]
    pub responsible_phone: Option<String>,
    #[validate(email, length(max = 120))]
    pub responsible_email: Option<String>,
    pub specific_needs_description: Option<String>,
    pub pedagogue_id: Option<DbId>,
}

/// Student with their observations and recent attendance.
#[derive(Debug, Serialize)]
pub struct StudentDetail {
    #[serde(flatten)]
    pub student: Student,
    pub observations: Vec<Observation>,
    pub attendance: Vec<Attendance>,
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load a student or fail with 404.
pub async fn load_student(pool: &DbPool, id: DbId) -> AppResult<Student> {
    StudentRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }))
}

/// Load a student the caller may manage: 404 if missing, 403 if foreign.
pub async fn load_managed_student(pool: &DbPool, caller: &Caller, id: DbId) -> AppResult<Student> {
    let student = load_student(pool, id).await?;
    ensure_can_manage(caller, student.pedagogue_id, "student")?;
    Ok(student)
}

/// The pedagogue a student will belong to. Only an admin may name one, and
/// the named user must hold the pedagogue role.
async fn resolve_pedagogue(
    pool: &DbPool,
    caller: &Caller,
    requested: Option<DbId>,
) -> AppResult<DbId> {
    match requested {
        Some(id) if caller.is_admin() => {
            let user = UserRepo::find_by_id(pool, id)
                .await?
                .ok_or_else(|| AppError::BadRequest(format!("Pedagogue {id} does not exist")))?;
            if RoleRepo::resolve_name(pool, user.role_id).await? != ROLE_PEDAGOGUE {
                return Err(AppError::BadRequest(format!("User {id} is not a pedagogue")));
            }
            Ok(id)
        }
        _ => Ok(caller.user_id),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/students
///
/// Paginated, name-ordered list. Non-admins only see their own students.
pub async fn list_students(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<StudentQuery>,
) -> AppResult<Json<PageResponse<Student>>> {
    let page = PageRequest::new(params.page, params.per_page, state.config.page_size);
    let filter = StudentFilter {
        pattern: normalize_search(params.search.as_deref()).map(|t| contains_pattern(&t)),
        pedagogue_id: auth.caller().owner_scope(),
        grade: normalize_search(params.grade.as_deref()),
    };

    let students = StudentRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let total = StudentRepo::count(&state.pool, &filter).await?;
    Ok(Json(PageResponse::new(students, page, total)))
}

/// POST /api/v1/students
pub async fn create_student(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Json(input): Json<CreateStudentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Student>>)> {
    input.validate()?;
    validate_matricula(&input.matricula).map_err(CoreError::Validation)?;

    let caller = auth.caller();
    let pedagogue_id = resolve_pedagogue(&state.pool, &caller, input.pedagogue_id).await?;

    let student = StudentRepo::create(
        &state.pool,
        &CreateStudent {
            name: input.name.trim().to_string(),
            matricula: input.matricula,
            dob: input.dob,
            cid: input.cid,
            email: input.email,
            phone: input.phone,
            grade: input.grade,
            course: input.course,
            responsible_name: input.responsible_name,
            responsible_phone: input.responsible_phone,
            responsible_email: input.responsible_email,
            specific_needs_description: input.specific_needs_description,
            pedagogue_id: Some(pedagogue_id),
        },
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        student_id = student.id,
        pedagogue_id,
        "Student created"
    );

    if pedagogue_id != auth.user_id {
        let message = format!("Student {} was assigned to you", student.name);
        notify(&state.pool, pedagogue_id, &message, Some(&student_link(student.id))).await;
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: student })))
}

/// GET /api/v1/students/{id}
///
/// Student record with all observations and the latest attendance rows,
/// newest first.
pub async fn get_student(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<StudentDetail>>> {
    let student = load_managed_student(&state.pool, &auth.caller(), id).await?;
    let observations = ObservationRepo::list_for_student(&state.pool, id).await?;
    let attendance =
        AttendanceRepo::list_recent_for_student(&state.pool, id, DETAIL_ATTENDANCE_LIMIT).await?;

    Ok(Json(DataResponse {
        data: StudentDetail {
            student,
            observations,
            attendance,
        },
    }))
}

/// PUT /api/v1/students/{id}
///
/// Only admins may change `pedagogue_id`; the newly assigned pedagogue is
/// notified.
pub async fn update_student(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStudentRequest>,
) -> AppResult<Json<DataResponse<Student>>> {
    input.validate()?;
    if let Some(matricula) = &input.matricula {
        validate_matricula(matricula).map_err(CoreError::Validation)?;
    }

    let caller = auth.caller();
    let current = load_managed_student(&state.pool, &caller, id).await?;

    let reassigned_to = match input.pedagogue_id {
        Some(requested) if Some(requested) != current.pedagogue_id => {
            if !caller.is_admin() {
                return Err(AppError::Core(CoreError::Forbidden(
                    "Only administrators can reassign students".into(),
                )));
            }
            Some(resolve_pedagogue(&state.pool, &caller, Some(requested)).await?)
        }
        _ => None,
    };

    let update = UpdateStudent {
        name: input.name.map(|n| n.trim().to_string()),
        matricula: input.matricula,
        dob: input.dob,
        cid: input.cid,
        email: input.email,
        phone: input.phone,
        grade: input.grade,
        course: input.course,
        responsible_name: input.responsible_name,
        responsible_phone: input.responsible_phone,
        responsible_email: input.responsible_email,
        specific_needs_description: input.specific_needs_description,
        pedagogue_id: reassigned_to,
    };
    let student = StudentRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }))?;

    tracing::info!(user_id = auth.user_id, student_id = id, "Student updated");

    if let Some(pedagogue_id) = reassigned_to {
        tracing::info!(student_id = id, pedagogue_id, "Student reassigned");
        let message = format!("Student {} was assigned to you", student.name);
        notify(&state.pool, pedagogue_id, &message, Some(&student_link(id))).await;
    }

    Ok(Json(DataResponse { data: student }))
}

/// DELETE /api/v1/students/{id}
///
/// Observations, attendance and daily logs are removed with the student.
pub async fn delete_student(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_managed_student(&state.pool, &auth.caller(), id).await?;
    StudentRepo::delete(&state.pool, id).await?;
    tracing::info!(user_id = auth.user_id, student_id = id, "Student deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn student_link(id: DbId) -> String {
    format!("/students/{id}")
}
