use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_direction, delete_direction, get_direction, get_directions, update_direction,
};

pub fn init_directions_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_directions).post(create_direction))
        .route(
            "/{id}",
            get(get_direction)
                .put(update_direction)
                .patch(update_direction)
                .delete(delete_direction),
        )
}
