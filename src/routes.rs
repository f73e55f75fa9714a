use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home))
        .route("/process-voice/", post(handlers::process_voice))
        .route("/api/health", get(handlers::health_check))
}
