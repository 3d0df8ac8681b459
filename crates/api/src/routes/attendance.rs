//! Route definitions for the `/attendance` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::attendance;
use crate::state::AppState;

/// Routes mounted at `/attendance`.
///
/// ```text
/// GET    /        -> list_attendance
/// POST   /        -> mark_attendance (upsert)
/// GET    /mark    -> get_roster
/// POST   /mark    -> bulk_mark
/// PUT    /{id}    -> update_attendance
/// DELETE /{id}    -> delete_attendance
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(attendance::list_attendance).post(attendance::mark_attendance),
        )
        .route(
            "/mark",
            get(attendance::get_roster).post(attendance::bulk_mark),
        )
        .route(
            "/{id}",
            put(attendance::update_attendance).delete(attendance::delete_attendance),
        )
}
