use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use campus_core::{AppError, ErrorResponse};
use campus_models::auth::{RefreshTokenRequest, TokenPair, TokenRequest};
use campus_models::users::{RegisterUserDto, User};

use crate::metrics::track_user_created;
use crate::middleware::auth::RequireRegister;
use crate::modules::auth::service::AuthService;
use crate::modules::users::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a user of any role (admin only)
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterUserDto,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Malformed body or duplicate username/email", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, auth_user, dto), fields(admin_id = %auth_user.user_id()))]
pub async fn register(
    State(state): State<AppState>,
    RequireRegister(auth_user): RequireRegister,
    ValidatedJson(dto): ValidatedJson<RegisterUserDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = UserService::create_user(&state.db, dto).await?;
    track_user_created(user.role.as_str());
    Ok((StatusCode::CREATED, Json(user)))
}

/// Obtain an access/refresh token pair
#[utoipa::path(
    post,
    path = "/api/token",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token pair", body = TokenPair),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 429, description = "Too many attempts")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn obtain_token(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<TokenRequest>,
) -> Result<Json<TokenPair>, AppError> {
    let pair = AuthService::issue_tokens(&state.db, &state.jwt_config, dto).await?;
    Ok(Json(pair))
}

/// Trade a refresh token for a new pair
#[utoipa::path(
    post,
    path = "/api/token/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New token pair", body = TokenPair),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorResponse),
        (status = 429, description = "Too many attempts")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RefreshTokenRequest>,
) -> Result<Json<TokenPair>, AppError> {
    let pair = AuthService::refresh_tokens(&state.db, &state.jwt_config, dto).await?;
    Ok(Json(pair))
}
