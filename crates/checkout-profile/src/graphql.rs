//! # GraphQL Profile Service
//!
//! Looks up a user's billing profile through the GraphQL API using admin
//! credentials.

use crate::config::ProfileConfig;
use async_trait::async_trait;
use checkout_core::{
    CheckoutError, CheckoutResult, ProfileService, SubscriptionList, User, UserProfile,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

const GET_USER_QUERY: &str = r#"
query getUser($id: uuid!) {
  user(id: $id) {
    id
    profile {
      stripeCustomerId
      stripeCustomer {
        subscriptions {
          data {
            id
          }
        }
      }
    }
  }
}
"#;

/// Profile service backed by a GraphQL endpoint
pub struct GraphqlProfileService {
    config: ProfileConfig,
    client: Client,
}

impl GraphqlProfileService {
    pub fn new(config: ProfileConfig) -> CheckoutResult<Self> {
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
        Self::new(ProfileConfig::from_env()?)
    }
}

#[async_trait]
impl ProfileService for GraphqlProfileService {
    #[instrument(skip(self))]
    async fn get_user(&self, user_id: &str) -> CheckoutResult<Option<User>> {
        let request = GraphqlRequest {
            query: GET_USER_QUERY,
            variables: GetUserVariables { id: user_id },
        };

        let response = self
            .client
            .post(&self.config.graphql_url)
            .header("x-hasura-admin-secret", &self.config.admin_secret)
            .json(&request)
            .send()
            .await
            .map_err(|e| CheckoutError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Profile service error: status={}, body={}", status, body);
            return Err(CheckoutError::ProfileLookup(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let parsed: GraphqlResponse<GetUserData> = serde_json::from_str(&body).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse profile response: {}", e))
        })?;

        if let Some(first) = parsed.errors.into_iter().next() {
            return Err(CheckoutError::ProfileLookup(first.message));
        }

        let user = parsed
            .data
            .and_then(|d| d.user)
            .map(User::try_from)
            .transpose()?;
        debug!(found = user.is_some(), "Profile lookup complete");

        Ok(user)
    }
}

// =============================================================================
// GraphQL wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'static str,
    variables: GetUserVariables<'a>,
}

#[derive(Debug, Serialize)]
struct GetUserVariables<'a> {
    id: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GetUserData {
    user: Option<RemoteUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteUser {
    id: String,
    profile: Option<RemoteProfile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteProfile {
    stripe_customer_id: Option<String>,
    stripe_customer: Option<RemoteCustomer>,
}

#[derive(Debug, Deserialize)]
struct RemoteCustomer {
    #[serde(default)]
    subscriptions: SubscriptionList,
}

impl TryFrom<RemoteUser> for User {
    type Error = CheckoutError;

    /// A linked customer whose record did not resolve leaves the
    /// subscription state unknown, which is a lookup failure rather than
    /// an empty list.
    fn try_from(remote: RemoteUser) -> CheckoutResult<Self> {
        let profile = match remote.profile {
            Some(p) => {
                let subscriptions = match (p.stripe_customer, &p.stripe_customer_id) {
                    (Some(customer), _) => customer.subscriptions,
                    (None, None) => SubscriptionList::default(),
                    (None, Some(customer_id)) => {
                        return Err(CheckoutError::ProfileLookup(format!(
                            "Customer {} has no resolvable subscription state",
                            customer_id
                        )))
                    }
                };

                Some(UserProfile {
                    payment_customer_id: p.stripe_customer_id,
                    subscriptions,
                })
            }
            None => None,
        };

        Ok(User {
            id: remote.id,
            profile,
        })
    }
}
