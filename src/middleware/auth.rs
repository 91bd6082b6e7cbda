use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use campus_auth::{Claims, verify_token};
use campus_core::{AppError, Role};

use crate::state::AppState;

/// Extractor that validates the bearer access token and exposes its claims.
///
/// Handlers receive the identity as an explicit argument; nothing reads it
/// from ambient request state.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Uuid {
        self.0.sub
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }

    pub fn role(&self) -> Role {
        self.0.role
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Invalid authorization header format".to_string())
        })?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

/// Rejects with 403 unless `role` may perform `action` on `resource`.
pub fn check_access(
    auth_user: &AuthUser,
    resource: campus_core::Resource,
    action: campus_core::Action,
) -> Result<(), AppError> {
    if campus_core::allowed(auth_user.role(), resource, action) {
        return Ok(());
    }

    let requirement = campus_core::access::gate(resource, action)
        .map(|gate| gate.describe())
        .unwrap_or("operation not permitted");

    tracing::warn!(
        user_id = %auth_user.user_id(),
        role = %auth_user.role(),
        resource = %resource,
        action = %action,
        "access denied"
    );

    Err(AppError::forbidden(format!(
        "Access denied: {}",
        requirement
    )))
}

/// Declares an extractor that authenticates the caller and checks the access
/// table for one (resource, action) pair before the handler runs.
#[macro_export]
macro_rules! require_access {
    ($name:ident, $resource:ident, $action:ident) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = campus_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user =
                    $crate::middleware::auth::AuthUser::from_request_parts(parts, state).await?;

                $crate::middleware::auth::check_access(
                    &auth_user,
                    campus_core::Resource::$resource,
                    campus_core::Action::$action,
                )?;

                Ok($name(auth_user))
            }
        }
    };
}

require_access!(RequireRegister, Register, Write);
require_access!(RequireMe, Me, Read);

require_access!(RequireDirectionsRead, Directions, Read);
require_access!(RequireDirectionsWrite, Directions, Write);

require_access!(RequireSemestersRead, Semesters, Read);
require_access!(RequireSemestersWrite, Semesters, Write);

require_access!(RequireStudentsRead, Students, Read);
require_access!(RequireStudentsWrite, Students, Write);

require_access!(RequireCoursesRead, Courses, Read);
require_access!(RequireCoursesWrite, Courses, Write);

require_access!(RequireAttendanceRead, Attendance, Read);
require_access!(RequireAttendanceWrite, Attendance, Write);

require_access!(RequireGradesRead, Grades, Read);
require_access!(RequireGradesWrite, Grades, Write);

require_access!(RequireSchedulesRead, Schedules, Read);
require_access!(RequireSchedulesWrite, Schedules, Write);

require_access!(RequireStudentSchedulesRead, StudentSchedules, Read);

require_access!(RequireEventsRead, Events, Read);
require_access!(RequireEventsWrite, Events, Write);
