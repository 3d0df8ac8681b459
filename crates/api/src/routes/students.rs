//! Route definitions for `/students` and its nested observations.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{observation, student};
use crate::state::AppState;

/// Routes mounted at `/students`.
///
/// ```text
/// GET    /                              -> list_students
/// POST   /                              -> create_student
/// GET    /{id}                          -> get_student
/// PUT    /{id}                          -> update_student
/// DELETE /{id}                          -> delete_student
///
/// GET    /{id}/observations             -> list_observations
/// POST   /{id}/observations             -> create_observation
/// PUT    /{id}/observations/{obs_id}    -> update_observation
/// DELETE /{id}/observations/{obs_id}    -> delete_observation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(student::list_students).post(student::create_student),
        )
        .route(
            "/{id}",
            get(student::get_student)
                .put(student::update_student)
                .delete(student::delete_student),
        )
        .route(
            "/{id}/observations",
            get(observation::list_observations).post(observation::create_observation),
        )
        .route(
            "/{id}/observations/{obs_id}",
            put(observation::update_observation)
                .delete(observation::delete_observation),
        )
}
