use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_attendance, delete_attendance, get_attendance, get_attendance_list, update_attendance,
};

pub fn init_attendance_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_attendance_list).post(create_attendance))
        .route(
            "/{id}",
            get(get_attendance)
                .put(update_attendance)
                .patch(update_attendance)
                .delete(delete_attendance),
        )
}
