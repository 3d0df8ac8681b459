//! HTTP-level tests for authentication, profile and admin user management.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_user, get_auth, login, post_json, post_json_auth, put_json_auth,
    user_with_token, ADMIN_ROLE_ID, PEDAGOGUE_ROLE_ID, TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Login / refresh / logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_by_email_returns_tokens_and_user(pool: PgPool) {
    let user = create_user(&pool, "Maria Silva", "52998224725", PEDAGOGUE_ROLE_ID).await;
    let app = common::build_test_app(pool);

    let body = json!({ "login_id": user.email, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["expires_in"], 15 * 60);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "pedagogue");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_accepts_punctuated_cpf(pool: PgPool) {
    create_user(&pool, "Maria Silva", "52998224725", PEDAGOGUE_ROLE_ID).await;
    let app = common::build_test_app(pool);

    let body = json!({ "login_id": "529.982.247-25", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_and_unknown_login_are_both_401(pool: PgPool) {
    let user = create_user(&pool, "Maria Silva", "52998224725", PEDAGOGUE_ROLE_ID).await;
    let app = common::build_test_app(pool);

    let wrong = json!({ "login_id": user.email, "password": "not-the-password" });
    let response = post_json(app.clone(), "/api/v1/auth/login", wrong).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let unknown = json!({ "login_id": "ghost@academico.ifpb.edu.br", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", unknown).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_the_token(pool: PgPool) {
    let user = create_user(&pool, "Maria Silva", "52998224725", PEDAGOGUE_ROLE_ID).await;
    let app = common::build_test_app(pool);

    let body = json!({ "login_id": user.email, "password": TEST_PASSWORD });
    let login_json = body_json(post_json(app.clone(), "/api/v1/auth/login", body).await).await;
    let refresh_token = login_json["refresh_token"].as_str().unwrap().to_string();

    let response = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = body_json(response).await;
    assert_ne!(refreshed["refresh_token"], login_json["refresh_token"]);

    // The presented token was revoked.
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_refresh_tokens(pool: PgPool) {
    let user = create_user(&pool, "Maria Silva", "52998224725", PEDAGOGUE_ROLE_ID).await;
    let app = common::build_test_app(pool);

    let body = json!({ "login_id": user.email, "password": TEST_PASSWORD });
    let login_json = body_json(post_json(app.clone(), "/api/v1/auth/login", body).await).await;
    let access = login_json["access_token"].as_str().unwrap();

    let response = post_json_auth(app.clone(), "/api/v1/auth/logout", json!({}), access).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": login_json["refresh_token"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_returns_the_callers_account(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) =
        user_with_token(&pool, &app, "Maria Silva", "52998224725", PEDAGOGUE_ROLE_ID).await;

    let response = get_auth(app, "/api/v1/profile", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["cpf"], "52998224725");
    assert_eq!(json["data"]["role"], "pedagogue");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_email_taken_by_someone_else_is_409(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) =
        user_with_token(&pool, &app, "Maria Silva", "52998224725", PEDAGOGUE_ROLE_ID).await;
    let other = create_user(&pool, "Joao Lima", "11144477735", PEDAGOGUE_ROLE_ID).await;

    let body = json!({ "name": "Maria Silva", "email": other.email });
    let response = put_json_auth(app, "/api/v1/profile", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn password_change_requires_the_current_password(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (user, token) =
        user_with_token(&pool, &app, "Maria Silva", "52998224725", PEDAGOGUE_ROLE_ID).await;

    let wrong = json!({
        "old_password": "not-it",
        "new_password": "nova-senha-456",
        "confirm_new_password": "nova-senha-456",
    });
    let response = post_json_auth(app.clone(), "/api/v1/profile/password", wrong, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let right = json!({
        "old_password": TEST_PASSWORD,
        "new_password": "nova-senha-456",
        "confirm_new_password": "nova-senha-456",
    });
    let response = post_json_auth(app.clone(), "/api/v1/profile/password", right, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = json!({ "login_id": user.email, "password": "nova-senha-456" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Admin user management
// ---------------------------------------------------------------------------

fn new_user_body(cpf: &str, email: &str) -> serde_json::Value {
    json!({
        "name": "Carla Nunes",
        "cpf": cpf,
        "email": email,
        "password": TEST_PASSWORD,
        "confirm_password": TEST_PASSWORD,
        "role": "pedagogue",
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_creates_user_who_can_then_log_in(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, admin) = user_with_token(&pool, &app, "Admin Root", "52998224725", ADMIN_ROLE_ID).await;

    let body = new_user_body("111.444.777-35", "carla.nunes@academico.ifpb.edu.br");
    let response = post_json_auth(app.clone(), "/api/v1/admin/users", body, &admin).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["cpf"], "11144477735");
    assert_eq!(json["data"]["role"], "pedagogue");

    login(app, "11144477735").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_user_creation_validates_input(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, admin) = user_with_token(&pool, &app, "Admin Root", "52998224725", ADMIN_ROLE_ID).await;

    // Outside the institutional domain.
    let body = new_user_body("11144477735", "carla@gmail.com");
    let response = post_json_auth(app.clone(), "/api/v1/admin/users", body, &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Bad checksum.
    let body = new_user_body("11144477700", "carla.nunes@academico.ifpb.edu.br");
    let response = post_json_auth(app.clone(), "/api/v1/admin/users", body, &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Mismatched confirmation.
    let mut body = new_user_body("11144477735", "carla.nunes@academico.ifpb.edu.br");
    body["confirm_password"] = json!("different");
    let response = post_json_auth(app.clone(), "/api/v1/admin/users", body, &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // CPF already used by the admin.
    let body = new_user_body("52998224725", "carla.nunes@academico.ifpb.edu.br");
    let response = post_json_auth(app, "/api/v1/admin/users", body, &admin).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pedagogue_cannot_manage_users(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) =
        user_with_token(&pool, &app, "Maria Silva", "52998224725", PEDAGOGUE_ROLE_ID).await;

    let response = get_auth(app.clone(), "/api/v1/admin/users", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = new_user_body("11144477735", "carla.nunes@academico.ifpb.edu.br");
    let response = post_json_auth(app, "/api/v1/admin/users", body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_list_is_paginated_by_name(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, admin) = user_with_token(&pool, &app, "Admin Root", "52998224725", ADMIN_ROLE_ID).await;
    create_user(&pool, "Beatriz Alves", "11144477735", PEDAGOGUE_ROLE_ID).await;
    create_user(&pool, "Caio Duarte", "12345678909", PEDAGOGUE_ROLE_ID).await;

    let response = get_auth(app, "/api/v1/admin/users?page=1&per_page=2", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 3);
    assert_eq!(json["total_pages"], 2);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"][0]["name"], "Admin Root");
    assert_eq!(json["data"][1]["name"], "Beatriz Alves");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_cannot_delete_themselves(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (admin_user, admin) =
        user_with_token(&pool, &app, "Admin Root", "52998224725", ADMIN_ROLE_ID).await;

    let uri = format!("/api/v1/admin/users/{}", admin_user.id);
    let response = common::delete_auth(app, &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
