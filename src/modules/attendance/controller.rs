use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use campus_core::{AppError, ErrorResponse};
use campus_models::attendance::{
    Attendance, AttendanceFilterParams, CreateAttendanceDto, UpdateAttendanceDto,
};

use crate::middleware::auth::{RequireAttendanceRead, RequireAttendanceWrite};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AttendanceService;

#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = CreateAttendanceDto,
    responses(
        (status = 201, description = "Attendance recorded", body = Attendance),
        (status = 400, description = "Malformed body, unknown student or course, or duplicate record", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, auth_user, dto), fields(teacher = %auth_user.user_id()))]
pub async fn create_attendance(
    State(state): State<AppState>,
    RequireAttendanceWrite(auth_user): RequireAttendanceWrite,
    ValidatedJson(dto): ValidatedJson<CreateAttendanceDto>,
) -> Result<(StatusCode, Json<Attendance>), AppError> {
    let attendance = AttendanceService::create_attendance(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(attendance)))
}

#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceFilterParams),
    responses(
        (status = 200, description = "Attendance records, newest first", body = Vec<Attendance>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_attendance_list(
    State(state): State<AppState>,
    RequireAttendanceRead(_auth_user): RequireAttendanceRead,
    Query(filters): Query<AttendanceFilterParams>,
) -> Result<Json<Vec<Attendance>>, AppError> {
    let records = AttendanceService::get_attendance(&state.db, &filters).await?;
    Ok(Json(records))
}

#[utoipa::path(
    get,
    path = "/api/attendance/{id}",
    params(("id" = Uuid, Path, description = "Attendance ID")),
    responses(
        (status = 200, description = "Attendance record", body = Attendance),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse),
        (status = 404, description = "Attendance not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_attendance(
    State(state): State<AppState>,
    RequireAttendanceRead(_auth_user): RequireAttendanceRead,
    Path(id): Path<Uuid>,
) -> Result<Json<Attendance>, AppError> {
    let attendance = AttendanceService::get_attendance_by_id(&state.db, id).await?;
    Ok(Json(attendance))
}

#[utoipa::path(
    patch,
    path = "/api/attendance/{id}",
    params(("id" = Uuid, Path, description = "Attendance ID")),
    request_body = UpdateAttendanceDto,
    responses(
        (status = 200, description = "Attendance updated", body = Attendance),
        (status = 400, description = "Malformed body or constraint violation", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse),
        (status = 404, description = "Attendance not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, _auth_user, dto))]
pub async fn update_attendance(
    State(state): State<AppState>,
    RequireAttendanceWrite(_auth_user): RequireAttendanceWrite,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateAttendanceDto>,
) -> Result<Json<Attendance>, AppError> {
    let attendance = AttendanceService::update_attendance(&state.db, id, dto).await?;
    Ok(Json(attendance))
}

#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    params(("id" = Uuid, Path, description = "Attendance ID")),
    responses(
        (status = 204, description = "Attendance deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse),
        (status = 404, description = "Attendance not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_attendance(
    State(state): State<AppState>,
    RequireAttendanceWrite(_auth_user): RequireAttendanceWrite,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    AttendanceService::delete_attendance(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
