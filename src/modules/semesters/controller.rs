use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use campus_core::{AppError, ErrorResponse};
use campus_models::semesters::{
    CreateSemesterDto, Semester, SemesterFilterParams, UpdateSemesterDto,
};

use crate::middleware::auth::{RequireSemestersRead, RequireSemestersWrite};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::SemesterService;

#[utoipa::path(
    post,
    path = "/api/semesters",
    request_body = CreateSemesterDto,
    responses(
        (status = 201, description = "Semester created", body = Semester),
        (status = 400, description = "Malformed body, unknown direction or duplicate number", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Semesters"
)]
#[instrument(skip(state, _auth_user, dto))]
pub async fn create_semester(
    State(state): State<AppState>,
    RequireSemestersWrite(_auth_user): RequireSemestersWrite,
    ValidatedJson(dto): ValidatedJson<CreateSemesterDto>,
) -> Result<(StatusCode, Json<Semester>), AppError> {
    let semester = SemesterService::create_semester(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(semester)))
}

#[utoipa::path(
    get,
    path = "/api/semesters",
    params(SemesterFilterParams),
    responses(
        (status = 200, description = "Semesters ordered by direction and number", body = Vec<Semester>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Semesters"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_semesters(
    State(state): State<AppState>,
    RequireSemestersRead(_auth_user): RequireSemestersRead,
    Query(filters): Query<SemesterFilterParams>,
) -> Result<Json<Vec<Semester>>, AppError> {
    let semesters = SemesterService::get_semesters(&state.db, &filters).await?;
    Ok(Json(semesters))
}

#[utoipa::path(
    get,
    path = "/api/semesters/{id}",
    params(("id" = Uuid, Path, description = "Semester ID")),
    responses(
        (status = 200, description = "Semester", body = Semester),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Semester not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Semesters"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_semester(
    State(state): State<AppState>,
    RequireSemestersRead(_auth_user): RequireSemestersRead,
    Path(id): Path<Uuid>,
) -> Result<Json<Semester>, AppError> {
    let semester = SemesterService::get_semester_by_id(&state.db, id).await?;
    Ok(Json(semester))
}

#[utoipa::path(
    patch,
    path = "/api/semesters/{id}",
    params(("id" = Uuid, Path, description = "Semester ID")),
    request_body = UpdateSemesterDto,
    responses(
        (status = 200, description = "Semester updated", body = Semester),
        (status = 400, description = "Malformed body, unknown direction or duplicate number", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Semester not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Semesters"
)]
#[instrument(skip(state, _auth_user, dto))]
pub async fn update_semester(
    State(state): State<AppState>,
    RequireSemestersWrite(_auth_user): RequireSemestersWrite,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateSemesterDto>,
) -> Result<Json<Semester>, AppError> {
    let semester = SemesterService::update_semester(&state.db, id, dto).await?;
    Ok(Json(semester))
}

#[utoipa::path(
    delete,
    path = "/api/semesters/{id}",
    params(("id" = Uuid, Path, description = "Semester ID")),
    responses(
        (status = 204, description = "Semester deleted along with its courses"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Semester not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Semesters"
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_semester(
    State(state): State<AppState>,
    RequireSemestersWrite(_auth_user): RequireSemestersWrite,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    SemesterService::delete_semester(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
