//! # Checkout Session Types
//!
//! Parameters for a hosted subscription checkout and the session the
//! payment provider returns.

use crate::urls::CheckoutUrls;
use serde::{Deserialize, Serialize};

/// Checkout mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMode {
    Subscription,
}

impl CheckoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Subscription => "subscription",
        }
    }
}

/// Accepted payment method types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodType {
    Card,
}

impl PaymentMethodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethodType::Card => "card",
        }
    }
}

/// Billing address collection policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingAddressCollection {
    Required,
}

impl BillingAddressCollection {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingAddressCollection::Required => "required",
        }
    }
}

/// A line item referencing a provider-side price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLineItem {
    /// Price id as supplied by the caller; forwarded unvalidated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    /// Quantity
    pub quantity: u32,
}

/// Everything the payment provider needs to open a hosted checkout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionCheckout {
    /// Provider customer the session is bound to
    pub customer_id: String,

    /// Line items
    pub line_items: Vec<CheckoutLineItem>,

    /// Checkout mode
    pub mode: CheckoutMode,

    /// Accepted payment methods
    pub payment_method_types: Vec<PaymentMethodType>,

    /// Billing address policy
    pub billing_address_collection: BillingAddressCollection,

    /// Allow customers to enter promotion codes
    pub allow_promotion_codes: bool,

    /// Inherit trial period from the price's plan
    pub trial_from_plan: bool,

    /// URL to redirect after successful checkout
    pub success_url: String,

    /// URL to redirect if the customer cancels
    pub cancel_url: String,
}

impl SubscriptionCheckout {
    /// Subscription checkout for a single price with the fixed policy:
    /// card only, required billing address, promotion codes allowed and
    /// trial inherited from the plan.
    pub fn for_price(
        customer_id: impl Into<String>,
        price_id: Option<String>,
        urls: &CheckoutUrls,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            line_items: vec![CheckoutLineItem {
                price: price_id,
                quantity: 1,
            }],
            mode: CheckoutMode::Subscription,
            payment_method_types: vec![PaymentMethodType::Card],
            billing_address_collection: BillingAddressCollection::Required,
            allow_promotion_codes: true,
            trial_from_plan: true,
            success_url: urls.success_url(),
            cancel_url: urls.cancel_url(),
        }
    }

    /// Price of the first line item, if any
    pub fn price_id(&self) -> Option<&str> {
        self.line_items.first().and_then(|item| item.price.as_deref())
    }
}

/// A checkout session created by a payment provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider session id (e.g. `cs_...`)
    pub id: String,

    /// Hosted checkout URL to redirect the customer to
    pub url: String,

    /// Expiry as a unix timestamp, when the provider reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl CheckoutSession {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            expires_at: None,
        }
    }
}
