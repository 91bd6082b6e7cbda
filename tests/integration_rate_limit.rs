mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use campus_config::RateLimitConfig;
use campus_core::Role;
use common::{create_test_user, send, setup_test_app_with_rate_limit, token_for};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

fn token_request(uri: &str, client_ip: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-forwarded-for", client_ip)
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn strict_limit() -> RateLimitConfig {
    RateLimitConfig {
        auth_per_second: 60,
        auth_burst_size: 1,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_token_endpoint_rate_limited(pool: PgPool) {
    let app = setup_test_app_with_rate_limit(pool, strict_limit());
    let credentials = json!({ "username": "nobody", "password": "wrongpass" });

    let response = app
        .clone()
        .oneshot(token_request("/api/token", "192.168.1.100", credentials.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(token_request("/api/token", "192.168.1.100", credentials))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rate_limit_is_per_client(pool: PgPool) {
    let app = setup_test_app_with_rate_limit(pool, strict_limit());
    let credentials = json!({ "username": "nobody", "password": "wrongpass" });

    let response = app
        .clone()
        .oneshot(token_request("/api/token", "10.0.0.1", credentials.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(token_request("/api/token", "10.0.0.2", credentials))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_refresh_endpoint_rate_limited(pool: PgPool) {
    let app = setup_test_app_with_rate_limit(pool, strict_limit());
    let body = json!({ "refresh": "not-a-token" });

    let response = app
        .clone()
        .oneshot(token_request("/api/token/refresh", "192.168.1.100", body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(token_request("/api/token/refresh", "192.168.1.100", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_other_routes_not_rate_limited(pool: PgPool) {
    let user = create_test_user(&pool, Role::Student, None).await;
    let app = setup_test_app_with_rate_limit(pool, strict_limit());
    let token = token_for(&user);

    for _ in 0..5 {
        let (status, _) = send(&app, "GET", "/api/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
