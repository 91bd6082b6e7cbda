mod common;

use axum::http::StatusCode;
use campus_core::Role;
use common::{create_test_curriculum, create_test_user, send, setup_test_app, token_for};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_create_grade(pool: PgPool) {
    let teacher = create_test_user(&pool, Role::Teacher, None).await;
    let (_, _, course) = create_test_curriculum(&pool, Some(teacher.id)).await;
    let student = create_test_user(&pool, Role::Student, None).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/grades",
        Some(&token_for(&teacher)),
        Some(json!({
            "student": student.id,
            "course": course,
            "type": "module1",
            "score": 87
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["type"], "module1");
    assert_eq!(body["score"], 87);
    assert_eq!(body["student"], student.id.to_string());
    assert!(body["course_name"].as_str().unwrap().starts_with("Course "));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_grade_type_rejected(pool: PgPool) {
    let teacher = create_test_user(&pool, Role::Teacher, None).await;
    let (_, _, course) = create_test_curriculum(&pool, None).await;
    let student = create_test_user(&pool, Role::Student, None).await;
    let app = setup_test_app(pool.clone());
    let token = token_for(&teacher);

    let (status, _) = send(
        &app,
        "POST",
        "/api/grades",
        Some(&token),
        Some(json!({ "student": student.id, "course": course, "type": "final", "score": 70 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/api/grades",
        Some(&token),
        Some(json!({ "student": student.id, "course": course, "type": "final", "score": 90 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["fields"]["non_field_errors"][0],
        "This student already has a grade of this type for the course"
    );

    let scores: Vec<i32> = sqlx::query_scalar(
        "SELECT score FROM grades WHERE student_id = $1 AND course_id = $2 AND grade_type = 'final'",
    )
    .bind(student.id)
    .bind(course)
    .fetch_all(&pool)
    .await
    .unwrap();
    assert_eq!(scores, vec![70]);

    let (status, _) = send(
        &app,
        "POST",
        "/api/grades",
        Some(&token),
        Some(json!({ "student": student.id, "course": course, "type": "homework", "score": 90 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_grade_score_must_not_be_negative(pool: PgPool) {
    let teacher = create_test_user(&pool, Role::Teacher, None).await;
    let (_, _, course) = create_test_curriculum(&pool, None).await;
    let student = create_test_user(&pool, Role::Student, None).await;
    let app = setup_test_app(pool);
    let token = token_for(&teacher);

    let (status, body) = send(
        &app,
        "POST",
        "/api/grades",
        Some(&token),
        Some(json!({ "student": student.id, "course": course, "type": "lab", "score": -5 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["fields"]["score"].is_array());

    let (status, body) = send(
        &app,
        "POST",
        "/api/grades",
        Some(&token),
        Some(json!({ "student": student.id, "course": course, "type": "lab", "score": 120 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["score"], 120);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_grade_unknown_type(pool: PgPool) {
    let teacher = create_test_user(&pool, Role::Teacher, None).await;
    let (_, _, course) = create_test_curriculum(&pool, None).await;
    let student = create_test_user(&pool, Role::Student, None).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "POST",
        "/api/grades",
        Some(&token_for(&teacher)),
        Some(json!({ "student": student.id, "course": course, "type": "exam", "score": 50 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_grades_forbidden_for_student(pool: PgPool) {
    let student = create_test_user(&pool, Role::Student, None).await;
    let app = setup_test_app(pool);

    let (status, _) = send(&app, "GET", "/api/grades", Some(&token_for(&student)), None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_grades_by_type(pool: PgPool) {
    let teacher = create_test_user(&pool, Role::Teacher, None).await;
    let (_, _, course) = create_test_curriculum(&pool, None).await;
    let student = create_test_user(&pool, Role::Student, None).await;
    let app = setup_test_app(pool);
    let token = token_for(&teacher);

    for (grade_type, score) in [("module1", 60), ("module2", 75), ("final", 80)] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/grades",
            Some(&token),
            Some(json!({
                "student": student.id,
                "course": course,
                "type": grade_type,
                "score": score
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/api/grades?type=module2", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let grades = body.as_array().unwrap();
    assert_eq!(grades.len(), 1);
    assert_eq!(grades[0]["score"], 75);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/grades?course={}", course),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_grade_score(pool: PgPool) {
    let teacher = create_test_user(&pool, Role::Teacher, None).await;
    let (_, _, course) = create_test_curriculum(&pool, None).await;
    let student = create_test_user(&pool, Role::Student, None).await;
    let app = setup_test_app(pool);
    let token = token_for(&teacher);

    let (_, created) = send(
        &app,
        "POST",
        "/api/grades",
        Some(&token),
        Some(json!({ "student": student.id, "course": course, "type": "lab", "score": 40 })),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/grades/{}", id),
        Some(&token),
        Some(json!({ "score": 95 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 95);
    assert_eq!(body["type"], "lab");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/grades/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
