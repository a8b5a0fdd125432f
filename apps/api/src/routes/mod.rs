pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::evaluation::handlers;
use crate::state::AppState;

/// Any origin, with credentials. Origin, methods and headers are echoed back
/// because a wildcard cannot be combined with credentials.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/process", post(handlers::handle_process))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors_layer())
        .with_state(state)
}
