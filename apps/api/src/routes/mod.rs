pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::assistant::handlers as assistant;
use crate::state::AppState;
use crate::uploads::handlers::{self as uploads, UPLOAD_BODY_LIMIT};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/chat", post(assistant::handle_chat))
        .route(
            "/upload",
            post(uploads::handle_upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .with_state(state)
}
