//! Handlers for observations, nested under `/students/{id}/observations`.
//!
//! Whoever manages the student may list and add observations. Editing or
//! deleting one is reserved to its author and admins.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clai_core::access::{ensure_can_manage, Caller};
use clai_core::error::CoreError;
use clai_core::observation::{require_justification, validate_text};
use clai_core::types::{Date, DbId};
use clai_db::models::observation::{CreateObservation, Observation, UpdateObservation};
use clai_db::models::student::Student;
use clai_db::repositories::ObservationRepo;
use clai_db::DbPool;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::notification::notify;
use crate::handlers::student::{load_managed_student, load_student};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /students/{id}/observations`.
#[derive(Debug, Deserialize)]
pub struct CreateObservationRequest {
    /// Defaults to today.
    pub date: Option<Date>,
    pub observation_text: String,
}

/// Request body for `PUT /students/{id}/observations/{obs_id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateObservationRequest {
    pub date: Option<Date>,
    pub observation_text: String,
    /// Required whenever `observation_text` differs from the stored text.
    pub justification: Option<String>,
}

/// Load an observation of `student` that `caller` wrote, or any of them for
/// an admin.
async fn load_authored_observation(
    pool: &DbPool,
    caller: &Caller,
    student: &Student,
    obs_id: DbId,
) -> AppResult<Observation> {
    let observation = ObservationRepo::find_by_id(pool, obs_id)
        .await?
        .filter(|o| o.student_id == student.id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Observation",
            id: obs_id,
        }))?;

    ensure_can_manage(caller, Some(observation.author_id), "observation")?;
    Ok(observation)
}

/// GET /api/v1/students/{id}/observations
pub async fn list_observations(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Path(student_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Observation>>>> {
    load_managed_student(&state.pool, &auth.caller(), student_id).await?;
    let observations = ObservationRepo::list_for_student(&state.pool, student_id).await?;
    Ok(Json(DataResponse { data: observations }))
}

/// POST /api/v1/students/{id}/observations
pub async fn create_observation(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Path(student_id): Path<DbId>,
    Json(input): Json<CreateObservationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Observation>>)> {
    validate_text(&input.observation_text).map_err(CoreError::Validation)?;
    load_managed_student(&state.pool, &auth.caller(), student_id).await?;

    let observation = ObservationRepo::create(
        &state.pool,
        &CreateObservation {
            student_id,
            author_id: auth.user_id,
            date: input.date,
            observation_text: input.observation_text.trim().to_string(),
        },
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        student_id,
        observation_id = observation.id,
        "Observation created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: observation })))
}

/// PUT /api/v1/students/{id}/observations/{obs_id}
///
/// Changing the text requires a justification. When an admin edits someone
/// else's observation the author is notified.
pub async fn update_observation(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Path((student_id, obs_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateObservationRequest>,
) -> AppResult<Json<DataResponse<Observation>>> {
    let caller = auth.caller();
    let student = load_student(&state.pool, student_id).await?;
    let current = load_authored_observation(&state.pool, &caller, &student, obs_id).await?;

    let new_text = input.observation_text.trim().to_string();
    validate_text(&new_text).map_err(CoreError::Validation)?;
    require_justification(
        &current.observation_text,
        &new_text,
        input.justification.as_deref(),
    )
    .map_err(CoreError::Validation)?;

    let update = UpdateObservation {
        date: input.date,
        observation_text: new_text,
        justification: input
            .justification
            .map(|j| j.trim().to_string())
            .filter(|j| !j.is_empty()),
    };
    let observation = ObservationRepo::update(&state.pool, obs_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Observation",
            id: obs_id,
        }))?;

    tracing::info!(user_id = auth.user_id, observation_id = obs_id, "Observation updated");

    if caller.is_admin() && current.author_id != caller.user_id {
        let message = format!("An administrator edited your observation about {}", student.name);
        notify(
            &state.pool,
            current.author_id,
            &message,
            Some(&format!("/students/{student_id}")),
        )
        .await;
    }

    Ok(Json(DataResponse { data: observation }))
}

/// DELETE /api/v1/students/{id}/observations/{obs_id}
pub async fn delete_observation(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Path((student_id, obs_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let student = load_student(&state.pool, student_id).await?;
    load_authored_observation(&state.pool, &auth.caller(), &student, obs_id).await?;
    ObservationRepo::delete(&state.pool, obs_id).await?;
    tracing::info!(user_id = auth.user_id, observation_id = obs_id, "Observation deleted");
    Ok(StatusCode::NO_CONTENT)
}
