use axum::routing::get;
use axum::Router;

use crate::handlers::daily_log;
use crate::state::AppState;

/// Routes mounted at `/daily-logs`.
///
/// ```text
/// GET    /             -> list_daily_logs
/// POST   /             -> create_daily_log
/// GET    /activities   -> list_activities
/// GET    /{id}         -> get_daily_log
/// DELETE /{id}         -> delete_daily_log
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(daily_log::list_daily_logs).post(daily_log::create_daily_log),
        )
        .route("/activities", get(daily_log::list_activities))
        .route(
            "/{id}",
            get(daily_log::get_daily_log).delete(daily_log::delete_daily_log),
        )
}
