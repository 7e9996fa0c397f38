//! # checkout-profile
//!
//! Profile service client for the checkout session service.
//!
//! `GraphqlProfileService` fetches a user's payment-customer id and current
//! subscriptions from the GraphQL API, mapping the remote shape onto
//! `checkout_core::User`.

pub mod config;
pub mod graphql;

pub use config::ProfileConfig;
pub use graphql::GraphqlProfileService;
