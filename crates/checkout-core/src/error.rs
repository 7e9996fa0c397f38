//! # Checkout Error Types
//!
//! Typed error handling for the checkout session service.
//! All operations return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No resolvable caller identity
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Caller already holds a subscription
    #[error("User already have a subscription")]
    AlreadySubscribed,

    /// Caller has no linked payment-customer id
    #[error("User does not have a customer id")]
    MissingCustomerId,

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Profile service rejected or failed the lookup
    #[error("Profile lookup failed: {0}")]
    ProfileLookup(String),

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with a collaborator
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CheckoutError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::Unauthorized(_) => 401,
            CheckoutError::AlreadySubscribed
            | CheckoutError::MissingCustomerId
            | CheckoutError::InvalidRequest(_) => 400,
            CheckoutError::Configuration(_)
            | CheckoutError::ProfileLookup(_)
            | CheckoutError::ProviderError { .. }
            | CheckoutError::NetworkError(_)
            | CheckoutError::Serialization(_) => 500,
        }
    }

    /// Message surfaced to the caller.
    ///
    /// Provider and profile failures expose the collaborator's own message,
    /// without the variant prefix used by `Display`.
    pub fn client_message(&self) -> String {
        match self {
            CheckoutError::ProviderError { message, .. } => message.clone(),
            CheckoutError::InvalidRequest(message)
            | CheckoutError::ProfileLookup(message)
            | CheckoutError::NetworkError(message)
            | CheckoutError::Serialization(message)
            | CheckoutError::Configuration(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Business-rule rejections are expected outcomes, not failures.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            CheckoutError::AlreadySubscribed
                | CheckoutError::MissingCustomerId
                | CheckoutError::InvalidRequest(_)
        )
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;
