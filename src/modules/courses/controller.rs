use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use campus_core::{AppError, ErrorResponse};
use campus_models::courses::{Course, CourseFilterParams, CreateCourseDto, UpdateCourseDto};

use crate::middleware::auth::{RequireCoursesRead, RequireCoursesWrite};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::CourseService;

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Malformed body, unknown semester or professor", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _auth_user, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    RequireCoursesWrite(_auth_user): RequireCoursesWrite,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = CourseService::create_course(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// Readable by every authenticated role.
#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseFilterParams),
    responses(
        (status = 200, description = "Courses ordered by semester number and name", body = Vec<Course>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_courses(
    State(state): State<AppState>,
    RequireCoursesRead(_auth_user): RequireCoursesRead,
    Query(filters): Query<CourseFilterParams>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::get_courses(&state.db, &filters).await?;
    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course", body = Course),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_course(
    State(state): State<AppState>,
    RequireCoursesRead(_auth_user): RequireCoursesRead,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::get_course_by_id(&state.db, id).await?;
    Ok(Json(course))
}

#[utoipa::path(
    patch,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 400, description = "Malformed body, unknown semester or professor", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _auth_user, dto))]
pub async fn update_course(
    State(state): State<AppState>,
    RequireCoursesWrite(_auth_user): RequireCoursesWrite,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::update_course(&state.db, id, dto).await?;
    Ok(Json(course))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_course(
    State(state): State<AppState>,
    RequireCoursesWrite(_auth_user): RequireCoursesWrite,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    CourseService::delete_course(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
