mod common;

use axum::http::StatusCode;
use campus_core::Role;
use chrono::NaiveDate;
use common::{
    create_test_curriculum, create_test_schedule, create_test_user, send, setup_test_app,
    token_for,
};
use serde_json::json;
use sqlx::PgPool;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_schedule_as_teacher(pool: PgPool) {
    let teacher = create_test_user(&pool, Role::Teacher, None).await;
    let (_, _, course) = create_test_curriculum(&pool, Some(teacher.id)).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/schedules",
        Some(&token_for(&teacher)),
        Some(json!({
            "course": course,
            "date": "2024-09-02",
            "time": "10:15:00",
            "topic": "Vectors"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["course"], course.to_string());
    assert_eq!(body["time"], "10:15:00");
    assert_eq!(body["topic"], "Vectors");
    assert_eq!(body["professor_name"], format!("Test {}", teacher.username));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_schedule_as_admin(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin, None).await;
    let (_, _, course) = create_test_curriculum(&pool, None).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/schedules",
        Some(&token_for(&admin)),
        Some(json!({
            "course": course,
            "date": "2024-09-03",
            "time": "08:00:00",
            "topic": "Orientation"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["professor_name"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_schedules_forbidden_for_student(pool: PgPool) {
    let student = create_test_user(&pool, Role::Student, None).await;
    let app = setup_test_app(pool);

    let (status, _) = send(&app, "GET", "/api/schedules", Some(&token_for(&student)), None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_schedules_filtered(pool: PgPool) {
    let teacher = create_test_user(&pool, Role::Teacher, None).await;
    let (_, _, first) = create_test_curriculum(&pool, None).await;
    let (_, _, second) = create_test_curriculum(&pool, None).await;
    create_test_schedule(&pool, first, day(9)).await;
    create_test_schedule(&pool, first, day(2)).await;
    create_test_schedule(&pool, second, day(2)).await;
    let app = setup_test_app(pool);
    let token = token_for(&teacher);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/schedules?course={}", first),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let dates: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-09-02", "2024-09-09"]);

    let (status, body) = send(
        &app,
        "GET",
        "/api/schedules?date=2024-09-02",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_sees_only_own_direction(pool: PgPool) {
    let (own_direction, _, own_course) = create_test_curriculum(&pool, None).await;
    let (_, _, other_course) = create_test_curriculum(&pool, None).await;
    create_test_schedule(&pool, own_course, day(2)).await;
    create_test_schedule(&pool, own_course, day(4)).await;
    create_test_schedule(&pool, other_course, day(3)).await;
    let student = create_test_user(&pool, Role::Student, Some(own_direction)).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "GET",
        "/api/student/schedules",
        Some(&token_for(&student)),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let schedules = body.as_array().unwrap();
    assert_eq!(schedules.len(), 2);
    assert!(
        schedules
            .iter()
            .all(|s| s["course"] == own_course.to_string())
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_without_direction_sees_nothing(pool: PgPool) {
    let (_, _, course) = create_test_curriculum(&pool, None).await;
    create_test_schedule(&pool, course, day(2)).await;
    let student = create_test_user(&pool, Role::Student, None).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "GET",
        "/api/student/schedules",
        Some(&token_for(&student)),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_schedules_forbidden_for_teacher(pool: PgPool) {
    let teacher = create_test_user(&pool, Role::Teacher, None).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "GET",
        "/api/student/schedules",
        Some(&token_for(&teacher)),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_and_delete_schedule(pool: PgPool) {
    let teacher = create_test_user(&pool, Role::Teacher, None).await;
    let (_, _, course) = create_test_curriculum(&pool, None).await;
    let schedule = create_test_schedule(&pool, course, day(2)).await;
    let app = setup_test_app(pool);
    let token = token_for(&teacher);

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/schedules/{}", schedule),
        Some(&token),
        Some(json!({ "topic": "Matrices", "time": "11:00:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["topic"], "Matrices");
    assert_eq!(body["time"], "11:00:00");
    assert_eq!(body["date"], "2024-09-02");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/schedules/{}", schedule),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/schedules/{}", schedule),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
