mod common;

use axum::http::StatusCode;
use campus_core::Role;
use common::{
    create_test_direction, create_test_user, generate_unique_username, login, send,
    setup_test_app, token_for,
};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_as_admin(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin, None).await;
    let direction = create_test_direction(&pool).await;
    let app = setup_test_app(pool);
    let username = generate_unique_username();

    let (status, body) = send(
        &app,
        "POST",
        "/api/students",
        Some(&token_for(&admin)),
        Some(json!({
            "username": username,
            "email": format!("{}@test.local", username),
            "password": "studentpass123",
            "fio": "Maria Ivanova",
            "direction": direction,
            "course": 2
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "student");
    assert_eq!(body["direction"], direction.to_string());
    assert_eq!(body["course"], 2);
    assert!(body.get("password").is_none());

    let (status, _) = login(&app, &username, "studentpass123").await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_ignores_role_field(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin, None).await;
    let app = setup_test_app(pool);
    let username = generate_unique_username();

    let (status, body) = send(
        &app,
        "POST",
        "/api/students",
        Some(&token_for(&admin)),
        Some(json!({
            "username": username,
            "email": format!("{}@test.local", username),
            "password": "studentpass123",
            "fio": "Sneaky Admin",
            "role": "admin"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "student");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_invalid_email(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin, None).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/students",
        Some(&token_for(&admin)),
        Some(json!({
            "username": generate_unique_username(),
            "email": "not-an-email",
            "password": "studentpass123",
            "fio": "Bad Email"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["fields"]["email"].is_array());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_unknown_direction(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin, None).await;
    let app = setup_test_app(pool);
    let username = generate_unique_username();

    let (status, body) = send(
        &app,
        "POST",
        "/api/students",
        Some(&token_for(&admin)),
        Some(json!({
            "username": username,
            "email": format!("{}@test.local", username),
            "password": "studentpass123",
            "fio": "Lost Student",
            "direction": Uuid::new_v4()
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["direction"].is_array());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_students_only_students(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin, None).await;
    let direction = create_test_direction(&pool).await;
    create_test_user(&pool, Role::Teacher, None).await;
    let enrolled = create_test_user(&pool, Role::Student, Some(direction)).await;
    create_test_user(&pool, Role::Student, None).await;
    let app = setup_test_app(pool);
    let token = token_for(&admin);

    let (status, body) = send(&app, "GET", "/api/students", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let students = body.as_array().unwrap();
    assert_eq!(students.len(), 2);
    assert!(students.iter().all(|s| s["role"] == "student"));

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/students?direction={}", direction),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let students = body.as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["id"], enrolled.id.to_string());

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/students?search={}", enrolled.username),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_students_forbidden_for_teacher(pool: PgPool) {
    let teacher = create_test_user(&pool, Role::Teacher, None).await;
    let app = setup_test_app(pool);

    let (status, _) = send(&app, "GET", "/api/students", Some(&token_for(&teacher)), None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_student_rejects_other_roles(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin, None).await;
    let teacher = create_test_user(&pool, Role::Teacher, None).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/students/{}", teacher.id),
        Some(&token_for(&admin)),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Student not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_student_clears_direction(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin, None).await;
    let direction = create_test_direction(&pool).await;
    let student = create_test_user(&pool, Role::Student, Some(direction)).await;
    let app = setup_test_app(pool);
    let token = token_for(&admin);

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/students/{}", student.id),
        Some(&token),
        Some(json!({ "fio": "Renamed Student" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fio"], "Renamed Student");
    assert_eq!(body["direction"], direction.to_string());

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/students/{}", student.id),
        Some(&token),
        Some(json!({ "direction": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["direction"].is_null());
    assert_eq!(body["fio"], "Renamed Student");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_student_password(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin, None).await;
    let student = create_test_user(&pool, Role::Student, None).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/students/{}", student.id),
        Some(&token_for(&admin)),
        Some(json!({ "password": "brandnewpass1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = login(&app, &student.username, "brandnewpass1").await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_student(pool: PgPool) {
    let admin = create_test_user(&pool, Role::Admin, None).await;
    let student = create_test_user(&pool, Role::Student, None).await;
    let app = setup_test_app(pool.clone());
    let token = token_for(&admin);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/students/{}", student.id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(student.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/students/{}", admin.id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
