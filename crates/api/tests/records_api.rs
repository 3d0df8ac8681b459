//! HTTP-level tests for student records: students, observations, attendance,
//! reports, calendar events, daily logs, dashboard and notifications.

mod common;

use axum::http::StatusCode;
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use common::{
    body_json, delete_auth, get_auth, patch_json_auth, post_json_auth, put_json_auth,
    user_with_token, ADMIN_ROLE_ID, PEDAGOGUE_ROLE_ID,
};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn student_body(name: &str, matricula: &str) -> Value {
    json!({
        "name": name,
        "matricula": matricula,
        "dob": "2008-05-17",
        "grade": "1º Ano",
        "course": "Informática",
        "responsible_email": "familia@example.com",
    })
}

async fn create_student(app: &Router, token: &str, name: &str, matricula: &str) -> Value {
    let response = post_json_auth(
        app.clone(),
        "/api/v1/students",
        student_body(name, matricula),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

struct Staff {
    app: Router,
    admin_id: i64,
    admin: String,
    maria_id: i64,
    maria: String,
    joao: String,
}

/// One admin and two pedagogues, each logged in.
async fn staff(pool: &PgPool) -> Staff {
    let app = common::build_test_app(pool.clone());
    let (admin_user, admin) =
        user_with_token(pool, &app, "Admin Root", "52998224725", ADMIN_ROLE_ID).await;
    let (maria_user, maria) =
        user_with_token(pool, &app, "Maria Silva", "11144477735", PEDAGOGUE_ROLE_ID).await;
    let (_, joao) =
        user_with_token(pool, &app, "Joao Lima", "12345678909", PEDAGOGUE_ROLE_ID).await;
    Staff {
        app,
        admin_id: admin_user.id,
        admin,
        maria_id: maria_user.id,
        maria,
        joao,
    }
}

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn created_student_belongs_to_its_creator(pool: PgPool) {
    let s = staff(&pool).await;
    let student = create_student(&s.app, &s.maria, "Ana Souza", "202310000001").await;
    assert_eq!(student["pedagogue_id"], s.maria_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn student_input_is_validated(pool: PgPool) {
    let s = staff(&pool).await;

    let response = post_json_auth(
        s.app.clone(),
        "/api/v1/students",
        student_body("Ana Souza", "1999"),
        &s.maria,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let mut body = student_body("Ana Souza", "202310000001");
    body["responsible_email"] = json!("not-an-email");
    let response = post_json_auth(s.app.clone(), "/api/v1/students", body, &s.maria).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_matricula_is_409(pool: PgPool) {
    let s = staff(&pool).await;
    create_student(&s.app, &s.maria, "Ana Souza", "202310000001").await;

    let response = post_json_auth(
        s.app.clone(),
        "/api/v1/students",
        student_body("Bruno Costa", "202310000001"),
        &s.joao,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pedagogues_only_see_their_own_students(pool: PgPool) {
    let s = staff(&pool).await;
    let ana = create_student(&s.app, &s.maria, "Ana Souza", "202310000001").await;
    create_student(&s.app, &s.joao, "Bruno Costa", "202310000002").await;

    let json = body_json(get_auth(s.app.clone(), "/api/v1/students", &s.maria).await).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["name"], "Ana Souza");

    let json = body_json(get_auth(s.app.clone(), "/api/v1/students", &s.admin).await).await;
    assert_eq!(json["total"], 2);

    let uri = format!("/api/v1/students/{}", ana["id"]);
    let response = get_auth(s.app.clone(), &uri, &s.joao).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = delete_auth(s.app, &uri, &s.joao).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn students_are_searchable_by_matricula(pool: PgPool) {
    let s = staff(&pool).await;
    create_student(&s.app, &s.maria, "Ana Souza", "202310000001").await;
    create_student(&s.app, &s.maria, "Bruno Costa", "202420000002").await;

    let json = body_json(get_auth(s.app, "/api/v1/students?search=20242", &s.maria).await).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["name"], "Bruno Costa");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_admin_reassigns_and_new_pedagogue_is_notified(pool: PgPool) {
    let s = staff(&pool).await;
    let ana = create_student(&s.app, &s.joao, "Ana Souza", "202310000001").await;
    let uri = format!("/api/v1/students/{}", ana["id"]);

    let response = put_json_auth(
        s.app.clone(),
        &uri,
        json!({ "pedagogue_id": s.maria_id }),
        &s.joao,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Only pedagogues can own students.
    let response = put_json_auth(
        s.app.clone(),
        &uri,
        json!({ "pedagogue_id": s.admin_id }),
        &s.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        s.app.clone(),
        &uri,
        json!({ "pedagogue_id": s.maria_id }),
        &s.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["pedagogue_id"], s.maria_id);

    let json =
        body_json(get_auth(s.app.clone(), "/api/v1/notifications/unread-count", &s.maria).await)
            .await;
    assert_eq!(json["data"]["unread"], 1);

    let response = get_auth(s.app, &uri, &s.maria).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Observations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn editing_observation_text_requires_justification(pool: PgPool) {
    let s = staff(&pool).await;
    let ana = create_student(&s.app, &s.maria, "Ana Souza", "202310000001").await;
    let base = format!("/api/v1/students/{}/observations", ana["id"]);

    let response = post_json_auth(
        s.app.clone(),
        &base,
        json!({ "observation_text": "Participou bem da aula hoje" }),
        &s.maria,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let obs = body_json(response).await["data"].clone();
    let uri = format!("{base}/{}", obs["id"]);

    let edit = json!({ "observation_text": "Participou muito bem da aula hoje" });
    let response = put_json_auth(s.app.clone(), &uri, edit, &s.maria).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let edit = json!({
        "observation_text": "Participou muito bem da aula hoje",
        "justification": "Correção de registro",
    });
    let response = put_json_auth(s.app.clone(), &uri, edit, &s.maria).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["justification"], "Correção de registro");

    let detail = format!("/api/v1/students/{}", ana["id"]);
    let json = body_json(get_auth(s.app, &detail, &s.maria).await).await;
    assert_eq!(json["data"]["name"], "Ana Souza");
    assert_eq!(json["data"]["observations"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn short_observation_is_rejected(pool: PgPool) {
    let s = staff(&pool).await;
    let ana = create_student(&s.app, &s.maria, "Ana Souza", "202310000001").await;
    let base = format!("/api/v1/students/{}/observations", ana["id"]);

    let response =
        post_json_auth(s.app, &base, json!({ "observation_text": "curta" }), &s.maria).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_edit_notifies_the_author(pool: PgPool) {
    let s = staff(&pool).await;
    let ana = create_student(&s.app, &s.maria, "Ana Souza", "202310000001").await;
    let base = format!("/api/v1/students/{}/observations", ana["id"]);
    let obs = body_json(
        post_json_auth(
            s.app.clone(),
            &base,
            json!({ "observation_text": "Precisou de apoio na leitura" }),
            &s.maria,
        )
        .await,
    )
    .await["data"]
        .clone();

    let edit = json!({
        "observation_text": "Precisou de apoio na leitura e escrita",
        "justification": "Complemento",
    });
    let uri = format!("{base}/{}", obs["id"]);
    let response = put_json_auth(s.app.clone(), &uri, edit, &s.admin).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get_auth(s.app, "/api/v1/notifications", &s.maria).await).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["is_read"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_the_author_or_an_admin_changes_an_observation(pool: PgPool) {
    let s = staff(&pool).await;
    let ana = create_student(&s.app, &s.maria, "Ana Souza", "202310000001").await;
    let base = format!("/api/v1/students/{}/observations", ana["id"]);
    let response = post_json_auth(
        s.app.clone(),
        &base,
        json!({ "observation_text": "Reunião com a família sobre frequência" }),
        &s.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let obs = body_json(response).await["data"].clone();
    let uri = format!("{base}/{}", obs["id"]);

    // Maria owns the student, so she still reads the observation.
    let json = body_json(get_auth(s.app.clone(), &base, &s.maria).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let edit = json!({
        "observation_text": "Reunião com a família sobre notas",
        "justification": "Ajuste",
    });
    let response = put_json_auth(s.app.clone(), &uri, edit, &s.maria).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(s.app.clone(), &uri, &s.maria).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(s.app, &uri, &s.admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn marking_twice_keeps_one_record_with_latest_status(pool: PgPool) {
    let s = staff(&pool).await;
    let ana = create_student(&s.app, &s.maria, "Ana Souza", "202310000001").await;

    let mark = |status: &str| json!({ "student_id": ana["id"], "date": "2024-03-04", "status": status });
    let first = body_json(
        post_json_auth(s.app.clone(), "/api/v1/attendance", mark("absent"), &s.maria).await,
    )
    .await;
    let second = body_json(
        post_json_auth(s.app.clone(), "/api/v1/attendance", mark("present"), &s.maria).await,
    )
    .await;

    assert_eq!(first["data"]["id"], second["data"]["id"]);
    assert_eq!(second["data"]["status"], "present");

    let json = body_json(get_auth(s.app, "/api/v1/attendance", &s.maria).await).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["student_name"], "Ana Souza");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_status_is_rejected(pool: PgPool) {
    let s = staff(&pool).await;
    let ana = create_student(&s.app, &s.maria, "Ana Souza", "202310000001").await;

    let body = json!({ "student_id": ana["id"], "date": "2024-03-04", "status": "late" });
    let response = post_json_auth(s.app, "/api/v1/attendance", body, &s.maria).await;
    assert!(response.status().is_client_error());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bulk_mark_with_foreign_student_writes_nothing(pool: PgPool) {
    let s = staff(&pool).await;
    let ana = create_student(&s.app, &s.maria, "Ana Souza", "202310000001").await;
    let bruno = create_student(&s.app, &s.joao, "Bruno Costa", "202310000002").await;

    let body = json!({
        "date": "2024-03-04",
        "entries": [
            { "student_id": ana["id"], "status": "present" },
            { "student_id": bruno["id"], "status": "absent" },
        ],
    });
    let response = post_json_auth(s.app.clone(), "/api/v1/attendance/mark", body, &s.maria).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(get_auth(s.app, "/api/v1/attendance", &s.admin).await).await;
    assert_eq!(json["total"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn roster_shows_existing_statuses_and_grades(pool: PgPool) {
    let s = staff(&pool).await;
    let ana = create_student(&s.app, &s.maria, "Ana Souza", "202310000001").await;
    create_student(&s.app, &s.maria, "Bruno Costa", "202310000002").await;

    let body = json!({
        "date": "2024-03-04",
        "entries": [{ "student_id": ana["id"], "status": "justified_absent" }],
    });
    let response = post_json_auth(s.app.clone(), "/api/v1/attendance/mark", body, &s.maria).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(
        get_auth(s.app, "/api/v1/attendance/mark?date=2024-03-04", &s.maria).await,
    )
    .await;
    let students = json["data"]["students"].as_array().unwrap();
    assert_eq!(students.len(), 2);
    assert_eq!(students[0]["name"], "Ana Souza");
    assert_eq!(students[0]["status"], "justified_absent");
    assert_eq!(students[0]["status_label"], "Justificado");
    assert_eq!(students[1]["status"], Value::Null);
    assert_eq!(students[1]["status_label"], Value::Null);
    assert_eq!(json["data"]["grades"], json!(["1º Ano"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn moving_a_record_onto_a_taken_day_is_409(pool: PgPool) {
    let s = staff(&pool).await;
    let ana = create_student(&s.app, &s.maria, "Ana Souza", "202310000001").await;

    for day in ["2024-03-04", "2024-03-05"] {
        let body = json!({ "student_id": ana["id"], "date": day, "status": "present" });
        post_json_auth(s.app.clone(), "/api/v1/attendance", body, &s.maria).await;
    }
    let list = body_json(get_auth(s.app.clone(), "/api/v1/attendance", &s.maria).await).await;
    // Newest first: the 5th.
    let uri = format!("/api/v1/attendance/{}", list["data"][0]["id"]);

    let response = put_json_auth(s.app, &uri, json!({ "date": "2024-03-04" }), &s.maria).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn report_summarizes_the_window(pool: PgPool) {
    let s = staff(&pool).await;
    let ana = create_student(&s.app, &s.maria, "Ana Souza", "202310000001").await;
    let obs_uri = format!("/api/v1/students/{}/observations", ana["id"]);

    for (date, text) in [
        ("2024-03-04", "Chegou atrasada mas participou"),
        ("2024-03-06", "Apresentou trabalho em grupo"),
        ("2024-04-01", "Fora da janela do relatório"),
    ] {
        let body = json!({ "date": date, "observation_text": text });
        post_json_auth(s.app.clone(), &obs_uri, body, &s.maria).await;
    }
    for (date, status) in [("2024-03-04", "present"), ("2024-03-05", "absent")] {
        let body = json!({ "student_id": ana["id"], "date": date, "status": status });
        post_json_auth(s.app.clone(), "/api/v1/attendance", body, &s.maria).await;
    }

    let uri = format!(
        "/api/v1/reports/students/{}?start_date=2024-03-01&end_date=2024-03-10",
        ana["id"]
    );
    let response = get_auth(s.app, &uri, &s.maria).await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = &body_json(response).await["data"];

    assert_eq!(report["observation_summary"]["total_count"], 2);
    assert_eq!(report["observation_summary"]["duration_days"], 10);
    assert_eq!(report["observation_summary"]["average_per_day_display"], "0.20");
    assert_eq!(report["attendance"]["total_count"], 2);
    assert_eq!(report["attendance"]["breakdown"]["present"], 1);
    assert_eq!(report["attendance"]["breakdown"]["absent"], 1);
    assert_eq!(report["attendance"]["breakdown"]["attendance_rate_display"], "0.50");
    assert_eq!(report["daily_log_summary"]["total_count"], 0);
    assert_eq!(report["observations"][0]["date"], "2024-03-06");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn report_rejects_inverted_or_missing_dates(pool: PgPool) {
    let s = staff(&pool).await;
    let ana = create_student(&s.app, &s.maria, "Ana Souza", "202310000001").await;

    let inverted = format!(
        "/api/v1/reports/students/{}?start_date=2024-03-10&end_date=2024-03-01",
        ana["id"]
    );
    let response = get_auth(s.app.clone(), &inverted, &s.maria).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let missing = format!("/api/v1/reports/students/{}?start_date=2024-03-10", ana["id"]);
    let response = get_auth(s.app.clone(), &missing, &s.maria).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let ok = format!(
        "/api/v1/reports/students/{}?start_date=2024-03-01&end_date=2024-03-01",
        ana["id"]
    );
    let response = get_auth(s.app, &ok, &s.joao).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Calendar events
// ---------------------------------------------------------------------------

fn parse_ts(value: &Value) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value.as_str().unwrap())
        .unwrap()
        .with_timezone(&Utc)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn event_defaults_to_one_hour_and_keeps_length_when_moved(pool: PgPool) {
    let s = staff(&pool).await;

    let body = json!({ "title": "Reunião com a família", "start_time": "2030-01-10T09:00:00Z" });
    let response = post_json_auth(s.app.clone(), "/api/v1/events", body, &s.maria).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let event = body_json(response).await["data"].clone();
    let start = parse_ts(&event["start_time"]);
    assert_eq!(parse_ts(&event["end_time"]) - start, Duration::hours(1));

    let uri = format!("/api/v1/events/{}/schedule", event["id"]);
    let response = patch_json_auth(
        s.app.clone(),
        &uri,
        json!({ "start_time": "2030-01-11T14:00:00Z" }),
        &s.maria,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let moved = body_json(response).await["data"].clone();
    assert_eq!(
        parse_ts(&moved["end_time"]) - parse_ts(&moved["start_time"]),
        Duration::hours(1)
    );

    let uri = format!("/api/v1/events/{}", event["id"]);
    let response = get_auth(s.app, &uri, &s.joao).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn event_validation_and_linked_student_ownership(pool: PgPool) {
    let s = staff(&pool).await;
    let bruno = create_student(&s.app, &s.joao, "Bruno Costa", "202310000002").await;

    let short = json!({ "title": "Oi", "start_time": "2030-01-10T09:00:00Z" });
    let response = post_json_auth(s.app.clone(), "/api/v1/events", short, &s.maria).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let inverted = json!({
        "title": "Reunião pedagógica",
        "start_time": "2030-01-10T09:00:00Z",
        "end_time": "2030-01-10T08:00:00Z",
    });
    let response = post_json_auth(s.app.clone(), "/api/v1/events", inverted, &s.maria).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let foreign = json!({
        "title": "Atendimento individual",
        "start_time": "2030-01-10T09:00:00Z",
        "student_id": bruno["id"],
    });
    let response = post_json_auth(s.app, "/api/v1/events", foreign, &s.maria).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Daily logs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn daily_log_joins_shifts_and_checks_activity(pool: PgPool) {
    let s = staff(&pool).await;
    let ana = create_student(&s.app, &s.maria, "Ana Souza", "202310000001").await;

    let bad = json!({
        "student_id": ana["id"],
        "shifts": ["Madrugada"],
        "activity_type": "conducao_sala",
    });
    let response = post_json_auth(s.app.clone(), "/api/v1/daily-logs", bad, &s.maria).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let good = json!({
        "student_id": ana["id"],
        "date": "2024-03-04",
        "shifts": ["Tarde", "Manhã", "Tarde"],
        "activity_type": "conducao_sala",
    });
    let response = post_json_auth(s.app.clone(), "/api/v1/daily-logs", good, &s.maria).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let log = body_json(response).await["data"].clone();
    assert_eq!(log["shift"], "Manhã, Tarde");

    let uri = format!("/api/v1/daily-logs/{}", log["id"]);
    let response = get_auth(s.app.clone(), &uri, &s.joao).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(get_auth(s.app, "/api/v1/daily-logs/activities", &s.maria).await).await;
    assert!(json["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|a| a["key"] == "conducao_sala"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_the_author_or_an_admin_deletes_a_daily_log(pool: PgPool) {
    let s = staff(&pool).await;
    let ana = create_student(&s.app, &s.maria, "Ana Souza", "202310000001").await;
    let body = |shift: &str| {
        json!({
            "student_id": ana["id"],
            "shifts": [shift],
            "activity_type": "conducao_sala",
        })
    };

    let response =
        post_json_auth(s.app.clone(), "/api/v1/daily-logs", body("Manhã"), &s.admin).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let by_admin = format!("/api/v1/daily-logs/{}", body_json(response).await["data"]["id"]);

    let response = get_auth(s.app.clone(), &by_admin, &s.maria).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = delete_auth(s.app.clone(), &by_admin, &s.maria).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = delete_auth(s.app.clone(), &by_admin, &s.admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response =
        post_json_auth(s.app.clone(), "/api/v1/daily-logs", body("Tarde"), &s.maria).await;
    let by_maria = format!("/api/v1/daily-logs/{}", body_json(response).await["data"]["id"]);
    let response = delete_auth(s.app, &by_maria, &s.maria).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Dashboard & notifications
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_is_scoped_to_the_caller(pool: PgPool) {
    let s = staff(&pool).await;
    let ana = create_student(&s.app, &s.maria, "Ana Souza", "202310000001").await;
    create_student(&s.app, &s.joao, "Bruno Costa", "202310000002").await;

    let obs_uri = format!("/api/v1/students/{}/observations", ana["id"]);
    post_json_auth(
        s.app.clone(),
        &obs_uri,
        json!({ "observation_text": "Registro feito hoje em sala" }),
        &s.maria,
    )
    .await;
    let start = (Utc::now() + Duration::days(1)).to_rfc3339();
    post_json_auth(
        s.app.clone(),
        "/api/v1/events",
        json!({ "title": "Reunião de acompanhamento", "start_time": start }),
        &s.maria,
    )
    .await;

    let json = body_json(get_auth(s.app.clone(), "/api/v1/dashboard", &s.maria).await).await;
    assert_eq!(json["data"]["student_count"], 1);
    assert_eq!(json["data"]["recent_observations"], 1);
    assert_eq!(json["data"]["upcoming_events"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["students_per_course"][0]["course"], "Informática");

    let json = body_json(get_auth(s.app, "/api/v1/dashboard", &s.admin).await).await;
    assert_eq!(json["data"]["student_count"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn notifications_can_be_marked_read(pool: PgPool) {
    let s = staff(&pool).await;

    // Creating a student for another pedagogue notifies them.
    let mut body = student_body("Ana Souza", "202310000001");
    body["pedagogue_id"] = json!(s.maria_id);
    let created = post_json_auth(s.app.clone(), "/api/v1/students", body, &s.admin).await;
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(body_json(created).await["data"]["pedagogue_id"], s.maria_id);

    let list = body_json(get_auth(s.app.clone(), "/api/v1/notifications", &s.maria).await).await;
    assert_eq!(list["total"], 1);
    let uri = format!("/api/v1/notifications/{}/read", list["data"][0]["id"]);

    // Someone else's notification looks absent.
    let response = post_json_auth(s.app.clone(), &uri, json!({}), &s.joao).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json_auth(s.app.clone(), &uri, json!({}), &s.maria).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json =
        body_json(get_auth(s.app, "/api/v1/notifications/unread-count", &s.maria).await).await;
    assert_eq!(json["data"]["unread"], 0);
}
