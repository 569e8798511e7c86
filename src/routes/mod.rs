pub mod health;
pub mod summarize;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/summarize", post(summarize::summarize))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
