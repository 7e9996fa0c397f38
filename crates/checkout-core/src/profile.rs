//! # Profile Types
//!
//! Read-only view of a caller's account as returned by the profile service,
//! plus the eligibility rules checked before a checkout session is created.

use crate::error::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};

/// Authenticated caller, as resolved from the request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    /// Opaque user id issued by the identity provider
    pub id: String,
}

impl CallerIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A user record from the profile service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User id
    pub id: String,

    /// Billing profile, absent for accounts that were never provisioned
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

/// Billing-related part of a user's profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Payment provider customer id (e.g. `cus_...`)
    #[serde(default)]
    pub payment_customer_id: Option<String>,

    /// Subscriptions held by the customer
    #[serde(default)]
    pub subscriptions: SubscriptionList,
}

/// Subscription collection; only its length is inspected
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscriptionList {
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

impl SubscriptionList {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl UserProfile {
    /// Builder: set the payment customer id
    pub fn with_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.payment_customer_id = Some(customer_id.into());
        self
    }

    /// Builder: append a subscription entry
    pub fn with_subscription(mut self, subscription: serde_json::Value) -> Self {
        self.subscriptions.data.push(subscription);
        self
    }
}

/// Check that a user may start a new subscription checkout.
///
/// Existing subscriptions are checked before the customer link, so a
/// subscribed user is rejected as such whether or not a customer id is set.
/// Returns the payment customer id on success.
pub fn ensure_eligible(user: Option<&User>) -> CheckoutResult<&str> {
    let profile = user.and_then(|u| u.profile.as_ref());

    if profile.is_some_and(|p| !p.subscriptions.is_empty()) {
        return Err(CheckoutError::AlreadySubscribed);
    }

    profile
        .and_then(|p| p.payment_customer_id.as_deref())
        .filter(|id| !id.is_empty())
        .ok_or(CheckoutError::MissingCustomerId)
}
