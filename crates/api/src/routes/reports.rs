use axum::routing::get;
use axum::Router;

use crate::handlers::report;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET /students/{id}?start_date=&end_date=  -> student_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/students/{id}", get(report::student_report))
}
