//! Route definitions for the `/events` resource (calendar).

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::calendar;
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// GET    /                -> list_events (?start=&end=)
/// POST   /                -> create_event
/// GET    /{id}            -> get_event
/// PUT    /{id}            -> update_event
/// DELETE /{id}            -> delete_event
/// PATCH  /{id}/schedule   -> reschedule_event
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(calendar::list_events).post(calendar::create_event))
        .route(
            "/{id}",
            get(calendar::get_event)
                .put(calendar::update_event)
                .delete(calendar::delete_event),
        )
        .route("/{id}/schedule", patch(calendar::reschedule_event))
}
