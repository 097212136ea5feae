use axum::{
    Router,
    routing::get,
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/slots",
            get(handlers::slots::list_slots).post(handlers::slots::create_slot),
        )
        .route(
            "/slots/:id",
            get(handlers::slots::get_slot)
                .put(handlers::slots::update_slot)
                .delete(handlers::slots::delete_slot),
        )
}
