//! # Stripe Checkout Sessions
//!
//! Implementation of the Stripe Checkout Sessions API for subscription
//! sign-up.

use crate::config::StripeConfig;
use async_trait::async_trait;
use checkout_core::{
    CheckoutError, CheckoutResult, CheckoutSession, PaymentProvider, SubscriptionCheckout,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "stripe";

/// Stripe Checkout Session provider
///
/// Uses Stripe's hosted checkout page for secure payments.
pub struct StripeCheckoutProvider {
    config: StripeConfig,
    client: Client,
}

impl StripeCheckoutProvider {
    /// Create a new Stripe checkout provider
    pub fn new(config: StripeConfig) -> CheckoutResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                CheckoutError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        let config = StripeConfig::from_env()?;
        Self::new(config)
    }
}

/// Flatten checkout parameters into Stripe's bracketed form encoding.
fn session_form_params(params: &SubscriptionCheckout) -> Vec<(String, String)> {
    let mut form_params: Vec<(String, String)> = vec![
        ("mode".to_string(), params.mode.as_str().to_string()),
        ("customer".to_string(), params.customer_id.clone()),
        (
            "billing_address_collection".to_string(),
            params.billing_address_collection.as_str().to_string(),
        ),
        (
            "allow_promotion_codes".to_string(),
            params.allow_promotion_codes.to_string(),
        ),
        (
            "subscription_data[trial_from_plan]".to_string(),
            params.trial_from_plan.to_string(),
        ),
        ("success_url".to_string(), params.success_url.clone()),
        ("cancel_url".to_string(), params.cancel_url.clone()),
    ];

    for (i, method) in params.payment_method_types.iter().enumerate() {
        form_params.push((
            format!("payment_method_types[{}]", i),
            method.as_str().to_string(),
        ));
    }

    for (i, item) in params.line_items.iter().enumerate() {
        // Absent prices are left for Stripe to reject
        if let Some(ref price) = item.price {
            form_params.push((format!("line_items[{}][price]", i), price.clone()));
        }
        form_params.push((
            format!("line_items[{}][quantity]", i),
            item.quantity.to_string(),
        ));
    }

    form_params
}

#[async_trait]
impl PaymentProvider for StripeCheckoutProvider {
    #[instrument(skip(self, params), fields(customer = %params.customer_id))]
    async fn create_checkout_session(
        &self,
        params: &SubscriptionCheckout,
    ) -> CheckoutResult<CheckoutSession> {
        let form_params = session_form_params(params);

        debug!(
            "Creating Stripe checkout session: price={:?}, mode={}",
            params.price_id(),
            params.mode.as_str()
        );

        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| CheckoutError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(CheckoutError::ProviderError {
                    provider: PROVIDER.to_string(),
                    message: error_response.error.message,
                });
            }

            return Err(CheckoutError::ProviderError {
                provider: PROVIDER.to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let session_response: StripeCheckoutSessionResponse = serde_json::from_str(&body)
            .map_err(|e| {
                CheckoutError::Serialization(format!("Failed to parse Stripe response: {}", e))
            })?;

        info!(
            "Created Stripe checkout session: id={}, expires_at={:?}",
            session_response.id, session_response.expires_at
        );

        Ok(CheckoutSession {
            id: session_response.id,
            url: session_response.url,
            expires_at: session_response.expires_at,
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    id: String,
    url: String,
    #[serde(default)]
    expires_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::CheckoutUrls;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn params(price: Option<&str>) -> SubscriptionCheckout {
        SubscriptionCheckout::for_price(
            "cus_123",
            price.map(String::from),
            &CheckoutUrls::new("https://app.example.com"),
        )
    }

    fn provider_for(server: &MockServer) -> StripeCheckoutProvider {
        let config = StripeConfig::new("sk_test_abc123").with_api_base_url(server.uri());
        StripeCheckoutProvider::new(config).unwrap()
    }

    fn value_of<'a>(form: &'a [(String, String)], key: &str) -> Option<&'a str> {
        form.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_form_params_carry_policy() {
        let form = session_form_params(&params(Some("price_abc")));

        assert_eq!(value_of(&form, "mode"), Some("subscription"));
        assert_eq!(value_of(&form, "customer"), Some("cus_123"));
        assert_eq!(value_of(&form, "payment_method_types[0]"), Some("card"));
        assert_eq!(value_of(&form, "billing_address_collection"), Some("required"));
        assert_eq!(value_of(&form, "line_items[0][price]"), Some("price_abc"));
        assert_eq!(value_of(&form, "line_items[0][quantity]"), Some("1"));
        assert_eq!(value_of(&form, "allow_promotion_codes"), Some("true"));
        assert_eq!(
            value_of(&form, "subscription_data[trial_from_plan]"),
            Some("true")
        );
        assert_eq!(
            value_of(&form, "success_url"),
            Some("https://app.example.com/account")
        );
        assert_eq!(value_of(&form, "cancel_url"), Some("https://app.example.com/"));
        assert!(value_of(&form, "line_items[1][quantity]").is_none());
    }

    #[test]
    fn test_form_params_without_price() {
        let form = session_form_params(&params(None));

        assert!(value_of(&form, "line_items[0][price]").is_none());
        assert_eq!(value_of(&form, "line_items[0][quantity]"), Some("1"));
    }

    #[tokio::test]
    async fn test_create_session_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .and(header("authorization", "Bearer sk_test_abc123"))
            .and(body_string_contains("mode=subscription"))
            .and(body_string_contains("customer=cus_123"))
            .and(body_string_contains("line_items%5B0%5D%5Bprice%5D=price_abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_1",
                "object": "checkout.session",
                "url": "https://pay/cs_1",
                "expires_at": 1_700_000_000
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = provider_for(&server)
            .create_checkout_session(&params(Some("price_abc")))
            .await
            .unwrap();

        assert_eq!(session.id, "cs_1");
        assert_eq!(session.url, "https://pay/cs_1");
        assert_eq!(session.expires_at, Some(1_700_000_000));
    }

    #[tokio::test]
    async fn test_create_session_no_idempotency_key() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_2",
                "url": "https://pay/cs_2"
            })))
            .mount(&server)
            .await;

        provider_for(&server)
            .create_checkout_session(&params(Some("price_abc")))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("idempotency-key").is_none());
    }

    #[tokio::test]
    async fn test_create_session_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(402).set_body_json(json!({
                "error": {
                    "type": "card_error",
                    "code": "card_declined",
                    "message": "card declined"
                }
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .create_checkout_session(&params(Some("price_abc")))
            .await
            .unwrap_err();

        match err {
            CheckoutError::ProviderError { provider, message } => {
                assert_eq!(provider, "stripe");
                assert_eq!(message, "card declined");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_session_unparseable_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .create_checkout_session(&params(Some("price_abc")))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 500);
        assert!(err.client_message().contains("upstream unavailable"));
    }

    #[tokio::test]
    async fn test_create_session_malformed_success_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "cs_3" })))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .create_checkout_session(&params(Some("price_abc")))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Serialization(_)));
    }
}
