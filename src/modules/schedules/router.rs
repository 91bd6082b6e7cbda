use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_schedule, delete_schedule, get_schedule, get_schedules, get_student_schedules,
    update_schedule,
};

pub fn init_schedules_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_schedules).post(create_schedule))
        .route(
            "/{id}",
            get(get_schedule)
                .put(update_schedule)
                .patch(update_schedule)
                .delete(delete_schedule),
        )
}

/// Mounted at `/student/schedules`.
pub fn init_student_schedules_router() -> Router<AppState> {
    Router::new().route("/", get(get_student_schedules))
}
