use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_semester, delete_semester, get_semester, get_semesters, update_semester,
};

pub fn init_semesters_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_semesters).post(create_semester))
        .route(
            "/{id}",
            get(get_semester)
                .put(update_semester)
                .patch(update_semester)
                .delete(delete_semester),
        )
}
