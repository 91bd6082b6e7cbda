use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::{Json, Router, extract::State, middleware, routing::get};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{OpenApi, ToSchema};
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::{init_metrics, metrics_middleware, metrics_router};
use crate::modules::attendance::init_attendance_router;
use crate::modules::auth::init_auth_router;
use crate::modules::courses::init_courses_router;
use crate::modules::directions::init_directions_router;
use crate::modules::events::init_events_router;
use crate::modules::grades::init_grades_router;
use crate::modules::schedules::{init_schedules_router, init_student_schedules_router};
use crate::modules::semesters::init_semesters_router;
use crate::modules::students::init_students_router;
use crate::modules::users::init_users_router;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

/// Liveness probe. Reports 503 when the database is unreachable.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database are up", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                database: "up".to_string(),
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded".to_string(),
                    database: "down".to_string(),
                }),
            )
        }
    }
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(init_auth_router(&state))
        .merge(init_users_router())
        .nest("/directions", init_directions_router())
        .nest("/semesters", init_semesters_router())
        .nest("/students", init_students_router())
        .nest("/courses", init_courses_router())
        .nest("/attendance", init_attendance_router())
        .nest("/grades", init_grades_router())
        .nest("/schedules", init_schedules_router())
        .nest("/student/schedules", init_student_schedules_router())
        .nest("/events", init_events_router());

    let mut app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/health", get(health_check))
        .nest("/api", api)
        .with_state(state.clone());

    match init_metrics() {
        Ok(Some(handle)) => app = app.merge(metrics_router(handle)),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "metrics recorder not installed, /metrics disabled"),
    }

    app.route_layer(middleware::from_fn(metrics_middleware))
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
