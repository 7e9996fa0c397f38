//! # Request Handlers
//!
//! Axum request handlers for the checkout session endpoint.
//!
//! The checkout flow is a straight line of gates, each returning early:
//! authenticate → parse body → fetch profile → check eligibility → create
//! session.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use checkout_core::{ensure_eligible, CheckoutError, CheckoutResult, SubscriptionCheckout};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

/// Body returned for every unauthenticated request
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized 1";

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create checkout session request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutSessionRequest {
    /// Provider price id to subscribe to
    #[serde(default)]
    pub price_id: Option<String>,
}

/// Create checkout session response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutSessionResponse {
    /// Session ID
    pub session_id: String,
    /// Checkout URL (redirect user here)
    pub session_url: String,
}

/// Error response for client errors (401/400)
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Error response for upstream failures (500)
#[derive(Debug, Serialize, Deserialize)]
pub struct UpstreamErrorResponse {
    pub error: UpstreamError,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamError {
    pub status_code: u16,
    pub message: String,
}

/// HTTP-facing wrapper around `CheckoutError`
#[derive(Debug)]
pub struct ApiError(pub CheckoutError);

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        match err.status_code() {
            401 => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new(UNAUTHORIZED_MESSAGE)),
            )
                .into_response(),
            400 => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(err.client_message())),
            )
                .into_response(),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(UpstreamErrorResponse {
                    error: UpstreamError {
                        status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                        message: err.client_message(),
                    },
                }),
            )
                .into_response(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "checkout-session",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Any method other than POST on the checkout endpoint
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        "Method Not Allowed",
    )
}

/// Create a subscription checkout session for the authenticated caller
#[instrument(skip_all)]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CreateCheckoutSessionResponse>, ApiError> {
    let session = run_checkout(&state, &headers, &body).await.map_err(|err| {
        if matches!(err, CheckoutError::Unauthorized(_)) {
            debug!("Rejected unauthenticated request: {}", err);
        } else if err.is_rejection() {
            info!("Checkout rejected: {}", err);
        } else {
            error!("Failed to create checkout session: {}", err.client_message());
        }
        ApiError::from(err)
    })?;

    Ok(Json(CreateCheckoutSessionResponse {
        session_id: session.id,
        session_url: session.url,
    }))
}

async fn run_checkout(
    state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
) -> CheckoutResult<checkout_core::CheckoutSession> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let caller = state.authenticator.authenticate(authorization)?;

    let request = parse_request(body)?;

    let user = state.profiles.get_user(&caller.id).await?;
    let customer_id = ensure_eligible(user.as_ref())?;

    let params = SubscriptionCheckout::for_price(customer_id, request.price_id, &state.urls);

    info!(
        user_id = %caller.id,
        provider = state.payments.provider_name(),
        "Creating checkout session: price={:?}",
        params.price_id()
    );

    let session = state.payments.create_checkout_session(&params).await?;

    info!("Created checkout session: {}", session.id);

    Ok(session)
}

/// An empty body counts as an empty request object.
fn parse_request(body: &[u8]) -> CheckoutResult<CreateCheckoutSessionRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CreateCheckoutSessionRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        debug!("Unparseable checkout request body: {}", e);
        CheckoutError::InvalidRequest("Invalid request body".to_string())
    })
}
