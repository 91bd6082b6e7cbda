use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use campus_core::{AppError, ErrorResponse};
use campus_models::directions::{
    CreateDirectionDto, Direction, DirectionFilterParams, UpdateDirectionDto,
};

use crate::middleware::auth::{RequireDirectionsRead, RequireDirectionsWrite};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::DirectionService;

#[utoipa::path(
    post,
    path = "/api/directions",
    request_body = CreateDirectionDto,
    responses(
        (status = 201, description = "Direction created", body = Direction),
        (status = 400, description = "Malformed body or duplicate name", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Directions"
)]
#[instrument(skip(state, _auth_user, dto))]
pub async fn create_direction(
    State(state): State<AppState>,
    RequireDirectionsWrite(_auth_user): RequireDirectionsWrite,
    ValidatedJson(dto): ValidatedJson<CreateDirectionDto>,
) -> Result<(StatusCode, Json<Direction>), AppError> {
    let direction = DirectionService::create_direction(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(direction)))
}

#[utoipa::path(
    get,
    path = "/api/directions",
    params(DirectionFilterParams),
    responses(
        (status = 200, description = "Directions ordered by name", body = Vec<Direction>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Directions"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_directions(
    State(state): State<AppState>,
    RequireDirectionsRead(_auth_user): RequireDirectionsRead,
    Query(filters): Query<DirectionFilterParams>,
) -> Result<Json<Vec<Direction>>, AppError> {
    let directions = DirectionService::get_directions(&state.db, &filters).await?;
    Ok(Json(directions))
}

#[utoipa::path(
    get,
    path = "/api/directions/{id}",
    params(("id" = Uuid, Path, description = "Direction ID")),
    responses(
        (status = 200, description = "Direction", body = Direction),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Direction not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Directions"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_direction(
    State(state): State<AppState>,
    RequireDirectionsRead(_auth_user): RequireDirectionsRead,
    Path(id): Path<Uuid>,
) -> Result<Json<Direction>, AppError> {
    let direction = DirectionService::get_direction_by_id(&state.db, id).await?;
    Ok(Json(direction))
}

#[utoipa::path(
    patch,
    path = "/api/directions/{id}",
    params(("id" = Uuid, Path, description = "Direction ID")),
    request_body = UpdateDirectionDto,
    responses(
        (status = 200, description = "Direction updated", body = Direction),
        (status = 400, description = "Malformed body or duplicate name", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Direction not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Directions"
)]
#[instrument(skip(state, _auth_user, dto))]
pub async fn update_direction(
    State(state): State<AppState>,
    RequireDirectionsWrite(_auth_user): RequireDirectionsWrite,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateDirectionDto>,
) -> Result<Json<Direction>, AppError> {
    let direction = DirectionService::update_direction(&state.db, id, dto).await?;
    Ok(Json(direction))
}

#[utoipa::path(
    delete,
    path = "/api/directions/{id}",
    params(("id" = Uuid, Path, description = "Direction ID")),
    responses(
        (status = 204, description = "Direction deleted along with its semesters"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Direction not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Directions"
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_direction(
    State(state): State<AppState>,
    RequireDirectionsWrite(_auth_user): RequireDirectionsWrite,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    DirectionService::delete_direction(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
