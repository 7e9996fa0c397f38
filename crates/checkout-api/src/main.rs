//! # checkout-session
//!
//! Subscription checkout session endpoint.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export PROFILE_GRAPHQL_URL=https://.../v1/graphql
//! export PROFILE_ADMIN_SECRET=...
//! export JWT_SECRET=...
//! export SITE_URL=https://app.example.com
//!
//! # Run the server
//! checkout-session
//! ```

use checkout_api::{routes, AppConfig, AppState, LogFormat};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    init_tracing(config.log_format);

    let addr = config.socket_addr()?;
    let is_prod = config.is_production();

    let state = AppState::new(config)?;

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.payments.provider_name());
    info!("Checkout redirects: {}", state.urls.base_url);

    let app = routes::create_router(state);

    info!("checkout-session starting on http://{}", addr);

    if !is_prod {
        info!("Health: GET http://{}/health", addr);
        info!(
            "Checkout: POST http://{}{}",
            addr,
            routes::CHECKOUT_SESSION_PATH
        );
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}
