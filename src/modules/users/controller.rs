use axum::{Json, extract::State};
use tracing::instrument;

use campus_core::{AppError, ErrorResponse};
use campus_models::users::User;

use crate::middleware::auth::RequireMe;
use crate::modules::users::service::UserService;
use crate::state::AppState;

/// Profile of the authenticated caller
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User no longer exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id()))]
pub async fn get_me(
    State(state): State<AppState>,
    RequireMe(auth_user): RequireMe,
) -> Result<Json<User>, AppError> {
    let user = UserService::get_user_by_id(&state.db, auth_user.user_id()).await?;
    Ok(Json(user))
}
