//! # Authentication
//!
//! Bearer-token authenticator. Verifies HS256 JWTs issued by the identity
//! provider and resolves the caller's user id.

use checkout_core::{Authenticator, CallerIdentity, CheckoutError, CheckoutResult};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::env;

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared HS256 signing secret
    pub jwt_secret: String,
}

impl AuthConfig {
    /// Load from environment variables (`JWT_SECRET`, required)
    pub fn from_env() -> CheckoutResult<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CheckoutResult<Self> {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CheckoutError::Configuration("JWT_SECRET not set".to_string()))?;

        Ok(Self { jwt_secret })
    }
}

/// Token claims. Session claims live under the identity provider's
/// namespace.
#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(rename = "https://hasura.io/jwt/claims", default)]
    session: Option<SessionClaims>,
}

#[derive(Debug, Deserialize)]
struct SessionClaims {
    #[serde(rename = "x-hasura-user-id", default)]
    user_id: Option<String>,
}

impl Claims {
    /// Session claim first, then the standard subject.
    fn user_id(self) -> Option<String> {
        self.session
            .and_then(|s| s.user_id)
            .or(self.sub)
            .filter(|id| !id.is_empty())
    }
}

/// Verifies `Authorization: Bearer <jwt>` headers
pub struct JwtAuthenticator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtAuthenticator {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn from_env() -> CheckoutResult<Self> {
        Ok(Self::new(&AuthConfig::from_env()?))
    }
}

impl Authenticator for JwtAuthenticator {
    fn authenticate(&self, authorization: Option<&str>) -> CheckoutResult<CallerIdentity> {
        let header = authorization.ok_or_else(|| {
            CheckoutError::Unauthorized("Missing Authorization header".to_string())
        })?;

        let token = bearer_token(header).ok_or_else(|| {
            CheckoutError::Unauthorized("Malformed Authorization header".to_string())
        })?;

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| CheckoutError::Unauthorized(format!("Invalid token: {}", e)))?;

        data.claims
            .user_id()
            .map(CallerIdentity::new)
            .ok_or_else(|| {
                CheckoutError::Unauthorized("Token carries no user id claim".to_string())
            })
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
