use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use campus_core::{AppError, ErrorResponse, Role};
use campus_models::users::{CreateStudentDto, StudentFilterParams, UpdateStudentDto, User};

use crate::metrics::track_user_created;
use crate::middleware::auth::{RequireStudentsRead, RequireStudentsWrite};
use crate::modules::users::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentFilterParams),
    responses(
        (status = 200, description = "Students", body = Vec<User>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_students(
    State(state): State<AppState>,
    RequireStudentsRead(_auth_user): RequireStudentsRead,
    Query(filters): Query<StudentFilterParams>,
) -> Result<Json<Vec<User>>, AppError> {
    let students = UserService::list_by_role(&state.db, Role::Student, &filters).await?;
    Ok(Json(students))
}

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = User),
        (status = 400, description = "Malformed body, duplicate username/email or unknown direction", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _auth_user, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    RequireStudentsWrite(_auth_user): RequireStudentsWrite,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let student = UserService::create_user(&state.db, dto.into()).await?;
    track_user_created(Role::Student.as_str());
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student", body = User),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_student(
    State(state): State<AppState>,
    RequireStudentsRead(_auth_user): RequireStudentsRead,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let student = UserService::get_by_role(&state.db, id, Role::Student).await?;
    Ok(Json(student))
}

/// Partial update; serves both PUT and PATCH
#[utoipa::path(
    patch,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = User),
        (status = 400, description = "Malformed body or constraint violation", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _auth_user, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    RequireStudentsWrite(_auth_user): RequireStudentsWrite,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<User>, AppError> {
    let student = UserService::update_by_role(&state.db, id, Role::Student, dto).await?;
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_student(
    State(state): State<AppState>,
    RequireStudentsWrite(_auth_user): RequireStudentsWrite,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    UserService::delete_by_role(&state.db, id, Role::Student).await?;
    Ok(StatusCode::NO_CONTENT)
}
