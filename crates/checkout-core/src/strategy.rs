//! # Collaborator Traits
//!
//! Seams to the external systems the checkout flow talks to. Each is held
//! as a trait object in application state so it can be swapped for a test
//! double.
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌─────────────────┐
//! │ Authenticator│──▶│ ProfileService │──▶│ PaymentProvider │
//! │  (identity)  │   │  (get_user)    │   │ (create session)│
//! └──────────────┘   └────────────────┘   └─────────────────┘
//!        ▲                   ▲                     ▲
//!   JwtAuthenticator  GraphqlProfileService  StripeCheckoutProvider
//! ```

use crate::error::CheckoutResult;
use crate::profile::{CallerIdentity, User};
use crate::session::{CheckoutSession, SubscriptionCheckout};
use async_trait::async_trait;
use std::sync::Arc;

/// Resolves the caller from the request's `Authorization` header value.
pub trait Authenticator: Send + Sync {
    /// Returns `Unauthorized` when no identity can be resolved.
    fn authenticate(&self, authorization: Option<&str>) -> CheckoutResult<CallerIdentity>;
}

/// Read-only access to user profiles.
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Fetch a user by id. `Ok(None)` when the user does not exist.
    async fn get_user(&self, user_id: &str) -> CheckoutResult<Option<User>>;
}

/// Payment provider able to open hosted checkout sessions.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a checkout session. Every call creates a new session.
    async fn create_checkout_session(
        &self,
        params: &SubscriptionCheckout,
    ) -> CheckoutResult<CheckoutSession>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

pub type SharedAuthenticator = Arc<dyn Authenticator>;
pub type SharedProfileService = Arc<dyn ProfileService>;
pub type SharedPaymentProvider = Arc<dyn PaymentProvider>;
