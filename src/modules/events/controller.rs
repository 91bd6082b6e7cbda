use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use campus_core::{AppError, ErrorResponse};
use campus_models::events::{
    CreateEventDto, Event, EventFilterParams, UpdateEventDto,
};

use crate::middleware::auth::{RequireEventsRead, RequireEventsWrite};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::EventService;

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventDto,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Malformed body or unknown recipient", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
#[instrument(skip(state, _auth_user, dto))]
pub async fn create_event(
    State(state): State<AppState>,
    RequireEventsWrite(_auth_user): RequireEventsWrite,
    ValidatedJson(dto): ValidatedJson<CreateEventDto>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let event = EventService::create_event(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    get,
    path = "/api/events",
    params(EventFilterParams),
    responses(
        (status = 200, description = "Events, newest first", body = Vec<Event>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_events(
    State(state): State<AppState>,
    RequireEventsRead(_auth_user): RequireEventsRead,
    Query(filters): Query<EventFilterParams>,
) -> Result<Json<Vec<Event>>, AppError> {
    let events = EventService::get_events(&state.db, &filters).await?;
    Ok(Json(events))
}

#[utoipa::path(
    get,
    path = "/api/events/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event", body = Event),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_event(
    State(state): State<AppState>,
    RequireEventsRead(_auth_user): RequireEventsRead,
    Path(id): Path<Uuid>,
) -> Result<Json<Event>, AppError> {
    let event = EventService::get_event_by_id(&state.db, id).await?;
    Ok(Json(event))
}

#[utoipa::path(
    patch,
    path = "/api/events/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = UpdateEventDto,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, description = "Malformed body or unknown recipient", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
#[instrument(skip(state, _auth_user, dto))]
pub async fn update_event(
    State(state): State<AppState>,
    RequireEventsWrite(_auth_user): RequireEventsWrite,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateEventDto>,
) -> Result<Json<Event>, AppError> {
    let event = EventService::update_event(&state.db, id, dto).await?;
    Ok(Json(event))
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_event(
    State(state): State<AppState>,
    RequireEventsWrite(_auth_user): RequireEventsWrite,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    EventService::delete_event(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
