use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use campus_core::{AppError, ErrorResponse};
use campus_models::schedules::{
    CreateScheduleDto, Schedule, ScheduleFilterParams, UpdateScheduleDto,
};

use crate::middleware::auth::{
    RequireSchedulesRead, RequireSchedulesWrite, RequireStudentSchedulesRead,
};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::ScheduleService;

#[utoipa::path(
    post,
    path = "/api/schedules",
    request_body = CreateScheduleDto,
    responses(
        (status = 201, description = "Schedule created", body = Schedule),
        (status = 400, description = "Malformed body or unknown course", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Teacher or admin role required", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
#[instrument(skip(state, _auth_user, dto))]
pub async fn create_schedule(
    State(state): State<AppState>,
    RequireSchedulesWrite(_auth_user): RequireSchedulesWrite,
    ValidatedJson(dto): ValidatedJson<CreateScheduleDto>,
) -> Result<(StatusCode, Json<Schedule>), AppError> {
    let schedule = ScheduleService::create_schedule(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

#[utoipa::path(
    get,
    path = "/api/schedules",
    params(ScheduleFilterParams),
    responses(
        (status = 200, description = "Schedules in chronological order", body = Vec<Schedule>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Teacher or admin role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_schedules(
    State(state): State<AppState>,
    RequireSchedulesRead(_auth_user): RequireSchedulesRead,
    Query(filters): Query<ScheduleFilterParams>,
) -> Result<Json<Vec<Schedule>>, AppError> {
    let schedules = ScheduleService::get_schedules(&state.db, &filters).await?;
    Ok(Json(schedules))
}

#[utoipa::path(
    get,
    path = "/api/schedules/{id}",
    params(("id" = Uuid, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule", body = Schedule),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Teacher or admin role required", body = ErrorResponse),
        (status = 404, description = "Schedule not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_schedule(
    State(state): State<AppState>,
    RequireSchedulesRead(_auth_user): RequireSchedulesRead,
    Path(id): Path<Uuid>,
) -> Result<Json<Schedule>, AppError> {
    let schedule = ScheduleService::get_schedule_by_id(&state.db, id).await?;
    Ok(Json(schedule))
}

#[utoipa::path(
    patch,
    path = "/api/schedules/{id}",
    params(("id" = Uuid, Path, description = "Schedule ID")),
    request_body = UpdateScheduleDto,
    responses(
        (status = 200, description = "Schedule updated", body = Schedule),
        (status = 400, description = "Malformed body or unknown course", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Teacher or admin role required", body = ErrorResponse),
        (status = 404, description = "Schedule not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
#[instrument(skip(state, _auth_user, dto))]
pub async fn update_schedule(
    State(state): State<AppState>,
    RequireSchedulesWrite(_auth_user): RequireSchedulesWrite,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateScheduleDto>,
) -> Result<Json<Schedule>, AppError> {
    let schedule = ScheduleService::update_schedule(&state.db, id, dto).await?;
    Ok(Json(schedule))
}

#[utoipa::path(
    delete,
    path = "/api/schedules/{id}",
    params(("id" = Uuid, Path, description = "Schedule ID")),
    responses(
        (status = 204, description = "Schedule deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Teacher or admin role required", body = ErrorResponse),
        (status = 404, description = "Schedule not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_schedule(
    State(state): State<AppState>,
    RequireSchedulesWrite(_auth_user): RequireSchedulesWrite,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ScheduleService::delete_schedule(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Timetable of the calling student's direction.
#[utoipa::path(
    get,
    path = "/api/student/schedules",
    responses(
        (status = 200, description = "Schedules of the student's direction", body = Vec<Schedule>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Student role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
#[instrument(skip(state, auth_user), fields(student = %auth_user.user_id()))]
pub async fn get_student_schedules(
    State(state): State<AppState>,
    RequireStudentSchedulesRead(auth_user): RequireStudentSchedulesRead,
) -> Result<Json<Vec<Schedule>>, AppError> {
    let schedules = ScheduleService::get_student_schedules(&state.db, auth_user.user_id()).await?;
    Ok(Json(schedules))
}
