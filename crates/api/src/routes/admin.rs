//! Route definitions for the `/admin` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. Handlers require the `admin` role.
///
/// ```text
/// GET    /users                  -> list_users
/// POST   /users                  -> create_user
/// GET    /users/{id}             -> get_user
/// PUT    /users/{id}             -> update_user
/// DELETE /users/{id}             -> delete_user
/// POST   /users/{id}/password    -> set_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route(
            "/users/{id}",
            get(admin::get_user)
                .put(admin::update_user)
                .delete(admin::delete_user),
        )
        .route("/users/{id}/password", post(admin::set_password))
}
