//! # Routes
//!
//! Axum router configuration for the checkout session API.

use crate::cors;
use crate::handlers;
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Path of the checkout session endpoint
pub const CHECKOUT_SESSION_PATH: &str = "/custom/create-checkout-session";

/// Create the main application router
///
/// Routes:
///   - POST /custom/create-checkout-session - Create checkout session
///     (any other method: 405 with `Allow: POST`)
///   - GET  /health - Health check
///
/// Every response, including preflight `OPTIONS`, carries the CORS headers.
pub fn create_router(state: AppState) -> Router {
    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(cors::cors_headers));

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            CHECKOUT_SESSION_PATH,
            post(handlers::create_checkout_session).fallback(handlers::method_not_allowed),
        )
        .layer(layers)
        .with_state(state)
}
