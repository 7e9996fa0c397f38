//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the injected collaborators, redirect URLs and server configuration.

use crate::auth::JwtAuthenticator;
use checkout_core::{
    CheckoutError, CheckoutResult, CheckoutUrls, SharedAuthenticator, SharedPaymentProvider,
    SharedProfileService,
};
use checkout_profile::GraphqlProfileService;
use checkout_stripe::StripeCheckoutProvider;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            log_format: match lookup("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> CheckoutResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                CheckoutError::Configuration(format!(
                    "Invalid socket address {}:{}: {}",
                    self.host, self.port, e
                ))
            })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            environment: "development".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Resolves the caller from the request
    pub authenticator: SharedAuthenticator,
    /// User profile lookups
    pub profiles: SharedProfileService,
    /// Checkout session creation
    pub payments: SharedPaymentProvider,
    /// Checkout redirect URLs
    pub urls: CheckoutUrls,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Build the production state: JWT auth, GraphQL profiles and Stripe.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let authenticator = JwtAuthenticator::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize auth: {}", e))?;

        let profiles = GraphqlProfileService::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize profile service: {}", e))?;

        let payments = StripeCheckoutProvider::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        Ok(Self::from_parts(
            Arc::new(authenticator),
            Arc::new(profiles),
            Arc::new(payments),
            CheckoutUrls::from_env(),
            config,
        ))
    }

    /// Assemble state from explicit collaborators
    pub fn from_parts(
        authenticator: SharedAuthenticator,
        profiles: SharedProfileService,
        payments: SharedPaymentProvider,
        urls: CheckoutUrls,
        config: AppConfig,
    ) -> Self {
        Self {
            authenticator,
            profiles,
            payments,
            urls,
            config,
        }
    }
}
