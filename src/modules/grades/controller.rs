use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use campus_core::{AppError, ErrorResponse};
use campus_models::grades::{
    Grade, GradeFilterParams, CreateGradeDto, UpdateGradeDto,
};

use crate::middleware::auth::{RequireGradesRead, RequireGradesWrite};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::GradeService;

#[utoipa::path(
    post,
    path = "/api/grades",
    request_body = CreateGradeDto,
    responses(
        (status = 201, description = "Grade created", body = Grade),
        (status = 400, description = "Malformed body, unknown student or course, or duplicate grade type", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse),
        (status = 422, description = "Score out of range", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
#[instrument(skip(state, auth_user, dto), fields(teacher = %auth_user.user_id()))]
pub async fn create_grade(
    State(state): State<AppState>,
    RequireGradesWrite(auth_user): RequireGradesWrite,
    ValidatedJson(dto): ValidatedJson<CreateGradeDto>,
) -> Result<(StatusCode, Json<Grade>), AppError> {
    let grade = GradeService::create_grade(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(grade)))
}

#[utoipa::path(
    get,
    path = "/api/grades",
    params(GradeFilterParams),
    responses(
        (status = 200, description = "Grades", body = Vec<Grade>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_grades(
    State(state): State<AppState>,
    RequireGradesRead(_auth_user): RequireGradesRead,
    Query(filters): Query<GradeFilterParams>,
) -> Result<Json<Vec<Grade>>, AppError> {
    let grades = GradeService::get_grades(&state.db, &filters).await?;
    Ok(Json(grades))
}

#[utoipa::path(
    get,
    path = "/api/grades/{id}",
    params(("id" = Uuid, Path, description = "Grade ID")),
    responses(
        (status = 200, description = "Grade", body = Grade),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse),
        (status = 404, description = "Grade not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_grade(
    State(state): State<AppState>,
    RequireGradesRead(_auth_user): RequireGradesRead,
    Path(id): Path<Uuid>,
) -> Result<Json<Grade>, AppError> {
    let grade = GradeService::get_grade_by_id(&state.db, id).await?;
    Ok(Json(grade))
}

#[utoipa::path(
    patch,
    path = "/api/grades/{id}",
    params(("id" = Uuid, Path, description = "Grade ID")),
    request_body = UpdateGradeDto,
    responses(
        (status = 200, description = "Grade updated", body = Grade),
        (status = 400, description = "Malformed body or constraint violation", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse),
        (status = 404, description = "Grade not found", body = ErrorResponse),
        (status = 422, description = "Score out of range", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
#[instrument(skip(state, _auth_user, dto))]
pub async fn update_grade(
    State(state): State<AppState>,
    RequireGradesWrite(_auth_user): RequireGradesWrite,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateGradeDto>,
) -> Result<Json<Grade>, AppError> {
    let grade = GradeService::update_grade(&state.db, id, dto).await?;
    Ok(Json(grade))
}

#[utoipa::path(
    delete,
    path = "/api/grades/{id}",
    params(("id" = Uuid, Path, description = "Grade ID")),
    responses(
        (status = 204, description = "Grade deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse),
        (status = 404, description = "Grade not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Grades"
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_grade(
    State(state): State<AppState>,
    RequireGradesWrite(_auth_user): RequireGradesWrite,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    GradeService::delete_grade(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
