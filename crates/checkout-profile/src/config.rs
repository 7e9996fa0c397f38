//! # Profile Service Configuration
//!
//! Endpoint and admin credentials for the GraphQL profile service.

use checkout_core::CheckoutError;
use std::env;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// GraphQL profile service configuration
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    /// GraphQL endpoint (e.g. `https://<subdomain>.hasura.app/v1/graphql`)
    pub graphql_url: String,

    /// Admin secret sent as `x-hasura-admin-secret`
    pub admin_secret: String,

    /// Per-request timeout for the HTTP client
    pub timeout: Duration,
}

impl ProfileConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `PROFILE_GRAPHQL_URL`
    /// - `PROFILE_ADMIN_SECRET`
    ///
    /// Optional: `PROFILE_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, CheckoutError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CheckoutError> {
        let graphql_url = lookup("PROFILE_GRAPHQL_URL").ok_or_else(|| {
            CheckoutError::Configuration("PROFILE_GRAPHQL_URL not set".to_string())
        })?;

        if !graphql_url.starts_with("http://") && !graphql_url.starts_with("https://") {
            return Err(CheckoutError::Configuration(
                "PROFILE_GRAPHQL_URL must be an http(s) URL".to_string(),
            ));
        }

        let admin_secret = lookup("PROFILE_ADMIN_SECRET").ok_or_else(|| {
            CheckoutError::Configuration("PROFILE_ADMIN_SECRET not set".to_string())
        })?;

        let timeout_secs = match lookup("PROFILE_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                CheckoutError::Configuration(format!(
                    "PROFILE_TIMEOUT_SECS is not a number: {}",
                    raw
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            timeout: Duration::from_secs(timeout_secs),
            ..Self::new(graphql_url, admin_secret)
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(graphql_url: impl Into<String>, admin_secret: impl Into<String>) -> Self {
        Self {
            graphql_url: graphql_url.into(),
            admin_secret: admin_secret.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_url_and_secret() {
        let result = ProfileConfig::from_lookup(|_| None);
        assert!(matches!(result, Err(CheckoutError::Configuration(_))));

        let result = ProfileConfig::from_lookup(|key: &str| {
            (key == "PROFILE_GRAPHQL_URL").then(|| "https://graphql.example/v1".to_string())
        });
        assert!(matches!(result, Err(CheckoutError::Configuration(_))));
    }

    #[test]
    fn test_rejects_non_http_url() {
        let result = ProfileConfig::from_lookup(|key: &str| match key {
            "PROFILE_GRAPHQL_URL" => Some("graphql.example".to_string()),
            "PROFILE_ADMIN_SECRET" => Some("secret".to_string()),
            _ => None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_loads_values() {
        let config = ProfileConfig::from_lookup(|key: &str| match key {
            "PROFILE_GRAPHQL_URL" => Some("https://graphql.example/v1".to_string()),
            "PROFILE_ADMIN_SECRET" => Some("secret".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.graphql_url, "https://graphql.example/v1");
        assert_eq!(config.admin_secret, "secret");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_timeout_override() {
        let lookup = |timeout: &'static str| {
            move |key: &str| match key {
                "PROFILE_GRAPHQL_URL" => Some("https://graphql.example/v1".to_string()),
                "PROFILE_ADMIN_SECRET" => Some("secret".to_string()),
                "PROFILE_TIMEOUT_SECS" => Some(timeout.to_string()),
                _ => None,
            }
        };

        let config = ProfileConfig::from_lookup(lookup("5")).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));

        let result = ProfileConfig::from_lookup(lookup("soon"));
        assert!(matches!(result, Err(CheckoutError::Configuration(_))));
    }
}
