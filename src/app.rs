use crate::handlers;
use crate::state::ServerState;
use axum::{routing::get, Router};

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/*path", get(handlers::asset))
        .with_state(state)
}
