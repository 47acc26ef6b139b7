//! API Routes
//!
//! Configures the Axum router with all cache service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    get_float_handler, get_handler, get_int_handler, get_text_handler, health_handler,
    replay_handler, store_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /store` - Store a payload under a generated key
/// - `GET /get/:key` - Raw bytes
/// - `GET /get/:key/text` - Value decoded as UTF-8
/// - `GET /get/:key/int` - Value parsed as an integer (0 on failure)
/// - `GET /get/:key/float` - Value parsed as a float (0.0 on failure)
/// - `GET /replay/:identity` - Plain-text call trace
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/store", post(store_handler))
        .route("/get/:key", get(get_handler))
        .route("/get/:key/text", get(get_text_handler))
        .route("/get/:key/int", get(get_int_handler))
        .route("/get/:key/float", get(get_float_handler))
        .route("/replay/:identity", get(replay_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
