//! # checkout-core
//!
//! Core types and traits for the subscription checkout session service.
//!
//! This crate provides:
//! - `PaymentProvider`, `ProfileService` and `Authenticator` traits for the
//!   external collaborators
//! - `User`, `UserProfile` and the `ensure_eligible` rule set
//! - `SubscriptionCheckout` and `CheckoutSession` for the checkout flow
//! - `CheckoutUrls` for redirect URL resolution
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{ensure_eligible, CheckoutUrls, SubscriptionCheckout};
//!
//! let caller = authenticator.authenticate(header)?;
//! let user = profiles.get_user(&caller.id).await?;
//! let customer_id = ensure_eligible(user.as_ref())?;
//!
//! let params = SubscriptionCheckout::for_price(customer_id, Some(price_id), &urls);
//! let session = provider.create_checkout_session(&params).await?;
//!
//! // Redirect user to session.url
//! ```

pub mod error;
pub mod profile;
pub mod session;
pub mod strategy;
pub mod urls;

// Re-exports for convenience
pub use error::{CheckoutError, CheckoutResult};
pub use profile::{ensure_eligible, CallerIdentity, SubscriptionList, User, UserProfile};
pub use session::{
    BillingAddressCollection, CheckoutLineItem, CheckoutMode, CheckoutSession,
    PaymentMethodType, SubscriptionCheckout,
};
pub use strategy::{
    Authenticator, PaymentProvider, ProfileService, SharedAuthenticator,
    SharedPaymentProvider, SharedProfileService,
};
pub use urls::CheckoutUrls;
