#![allow(dead_code)]

use std::sync::OnceLock;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use campus::router::init_router;
use campus::state::AppState;
use campus_auth::create_access_token;
use campus_config::{JwtConfig, RateLimitConfig};
use campus_core::{Role, hash_password};
use chrono::{NaiveDate, NaiveTime};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "testpass123";

/// Source address sent with token requests; the rate limiter keys on it.
pub const TEST_CLIENT_IP: &str = "192.168.1.100";

pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
}

/// bcrypt is slow in debug builds, so every fixture user shares one hash.
fn test_password_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(TEST_PASSWORD).unwrap())
}

pub fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

pub fn generate_unique_username() -> String {
    format!("user_{}", unique_suffix())
}

pub fn generate_unique_direction_name() -> String {
    format!("Direction {}", unique_suffix())
}

pub async fn create_test_user(pool: &PgPool, role: Role, direction: Option<Uuid>) -> TestUser {
    let username = generate_unique_username();

    let id: Uuid = sqlx::query_scalar(
        r#"INSERT INTO users (username, email, password, fio, role, direction_id)
           VALUES ($1, $2, $3, $4, $5, $6)
           RETURNING id"#,
    )
    .bind(&username)
    .bind(format!("{}@test.local", username))
    .bind(test_password_hash())
    .bind(format!("Test {}", username))
    .bind(role)
    .bind(direction)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser { id, username, role }
}

pub async fn create_test_direction(pool: &PgPool) -> Uuid {
    sqlx::query_scalar("INSERT INTO directions (name, semesters) VALUES ($1, 8) RETURNING id")
        .bind(generate_unique_direction_name())
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_semester(pool: &PgPool, direction: Uuid, number: i32) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO semesters (direction_id, number, credits) VALUES ($1, $2, 30) RETURNING id",
    )
    .bind(direction)
    .bind(number)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_course(pool: &PgPool, semester: Uuid, professor: Option<Uuid>) -> Uuid {
    sqlx::query_scalar(
        r#"INSERT INTO courses (semester_id, name, credits, is_mandatory, professor_id)
           VALUES ($1, $2, 5, TRUE, $3)
           RETURNING id"#,
    )
    .bind(semester)
    .bind(format!("Course {}", unique_suffix()))
    .bind(professor)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_schedule(pool: &PgPool, course: Uuid, date: NaiveDate) -> Uuid {
    sqlx::query_scalar(
        r#"INSERT INTO schedules (course_id, "date", "time", topic)
           VALUES ($1, $2, $3, 'Introduction')
           RETURNING id"#,
    )
    .bind(course)
    .bind(date)
    .bind(NaiveTime::from_hms_opt(9, 30, 0).unwrap())
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Direction -> semester 1 -> course, optionally taught by `professor`.
pub async fn create_test_curriculum(pool: &PgPool, professor: Option<Uuid>) -> (Uuid, Uuid, Uuid) {
    let direction = create_test_direction(pool).await;
    let semester = create_test_semester(pool, direction, 1).await;
    let course = create_test_course(pool, semester, professor).await;
    (direction, semester, course)
}

pub fn setup_test_app(pool: PgPool) -> Router {
    setup_test_app_with_rate_limit(
        pool,
        RateLimitConfig {
            auth_per_second: 1,
            auth_burst_size: 1000,
        },
    )
}

pub fn setup_test_app_with_rate_limit(pool: PgPool, rate_limit_config: RateLimitConfig) -> Router {
    dotenvy::dotenv().ok();
    let mut state = AppState::from_pool(pool);
    state.rate_limit_config = rate_limit_config;
    init_router(state)
}

/// Signs an access token directly, skipping the password round trip.
pub fn token_for(user: &TestUser) -> String {
    dotenvy::dotenv().ok();
    create_access_token(user.id, &user.username, user.role, &JwtConfig::from_env()).unwrap()
}

/// Logs in through `POST /api/token` and returns the response body.
pub async fn login(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/token")
        .header("content-type", "application/json")
        .header("x-forwarded-for", TEST_CLIENT_IP)
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": username,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, read_json(response).await)
}

pub async fn get_auth_token(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = login(app, username, password).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["access"].as_str().unwrap().to_string()
}

pub async fn read_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        return Value::Null;
    }
    // Extractor rejections and the rate limiter answer in plain text.
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
}

/// Sends a request with an optional bearer token and JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, read_json(response).await)
}
