//! # Redirect URLs
//!
//! Resolves the public origin of the web app and builds the success and
//! cancel redirects handed to the payment provider.

use std::env;

const DEFAULT_SITE_URL: &str = "http://localhost:3000";

/// Configuration for URLs used in checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutUrls {
    /// Origin of the web app, without trailing slash (e.g., "https://app.example.com")
    pub base_url: String,
    /// Success page path
    pub success_path: String,
    /// Cancel page path
    pub cancel_path: String,
}

impl CheckoutUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            success_path: "/account".to_string(),
            cancel_path: "/".to_string(),
        }
    }

    /// Resolve the base URL from the environment.
    ///
    /// Checks `SITE_URL`, then `VERCEL_URL`, then falls back to
    /// `http://localhost:3000`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let site_url = env::var("SITE_URL").ok();
        let vercel_url = env::var("VERCEL_URL").ok();
        Self::resolve(site_url.as_deref(), vercel_url.as_deref())
    }

    /// Pick the first non-empty candidate, falling back to localhost.
    pub fn resolve(site_url: Option<&str>, deployment_url: Option<&str>) -> Self {
        let raw = [site_url, deployment_url]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .unwrap_or(DEFAULT_SITE_URL);

        Self::new(raw)
    }

    pub fn success_url(&self) -> String {
        format!("{}{}", self.base_url, self.success_path)
    }

    pub fn cancel_url(&self) -> String {
        format!("{}{}", self.base_url, self.cancel_path)
    }
}

impl Default for CheckoutUrls {
    fn default() -> Self {
        Self::new(DEFAULT_SITE_URL)
    }
}

/// Deployment hosts are often configured without a scheme.
fn normalize_base_url(raw: &str) -> String {
    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };
    with_scheme.trim_end_matches('/').to_string()
}
