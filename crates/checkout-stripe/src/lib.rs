//! # checkout-stripe
//!
//! Stripe payment provider for the checkout session service.
//!
//! `StripeCheckoutProvider` talks to the Checkout Sessions API and opens a
//! hosted subscription checkout for an existing Stripe customer.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_stripe::StripeCheckoutProvider;
//! use checkout_core::{CheckoutUrls, PaymentProvider, SubscriptionCheckout};
//!
//! // Create provider from environment
//! let provider = StripeCheckoutProvider::from_env()?;
//!
//! let params = SubscriptionCheckout::for_price(
//!     "cus_123",
//!     Some("price_abc".to_string()),
//!     &CheckoutUrls::from_env(),
//! );
//! let session = provider.create_checkout_session(&params).await?;
//!
//! // Redirect user to session.url
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::StripeCheckoutProvider;
pub use config::StripeConfig;
