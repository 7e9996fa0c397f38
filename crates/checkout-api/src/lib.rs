//! # checkout-api
//!
//! HTTP endpoint that opens a hosted subscription checkout for the
//! authenticated caller.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Bearer JWT authentication
//! - CORS middleware with a fixed header contract
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/custom/create-checkout-session` | Create checkout session |
//! | OPTIONS | any | CORS preflight |

pub mod auth;
pub mod cors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use auth::{AuthConfig, JwtAuthenticator};
pub use routes::{create_router, CHECKOUT_SESSION_PATH};
pub use state::{AppConfig, AppState, LogFormat};
