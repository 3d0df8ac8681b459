pub mod admin;
pub mod attendance;
pub mod auth;
pub mod daily_logs;
pub mod dashboard;
pub mod events;
pub mod health;
pub mod notifications;
pub mod profile;
pub mod reports;
pub mod students;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login, /auth/refresh                   public
/// /auth/logout                                 auth
///
/// /admin/users[/{id}[/password]]               admin
/// /profile[/password]                          auth
/// /dashboard                                   auth
///
/// /students[/{id}]                             staff, owner or admin
/// /students/{id}/observations[/{obs_id}]       staff, author/owner or admin
/// /attendance[/{id}], /attendance/mark         staff, owner or admin
/// /reports/students/{id}                       auth, owner or admin
/// /events[/{id}[/schedule]]                    auth, owner or admin
/// /daily-logs[/{id}], /daily-logs/activities   staff, author/owner or admin
/// /notifications/...                           auth, own only
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/profile", profile::router())
        .nest("/dashboard", dashboard::router())
        .nest("/students", students::router())
        .nest("/attendance", attendance::router())
        .nest("/reports", reports::router())
        .nest("/events", events::router())
        .nest("/daily-logs", daily_logs::router())
        .nest("/notifications", notifications::router())
}
