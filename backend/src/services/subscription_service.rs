//! Subscription lookup for an authenticated principal.
//!
//! The provider has no notion of our principals, so the lookup resolves the
//! principal's email to a provider customer first and then asks for that
//! customer's most recent subscription. Both calls go through the same HTTP
//! client as invoice fetches.

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::models::{CustomerId, ListEnvelope, Principal, Subscription};

use super::payment_client::StripeClient;

/// Resolves the subscription held by a principal, if any.
///
/// Returning `Ok(None)` means the principal verifiably has no subscription;
/// the status on a returned subscription may still be non-qualifying and is
/// judged by the subscription gate, not here.
#[async_trait]
pub trait SubscriptionProvider: Send + Sync {
    async fn active_subscription(
        &self,
        principal: &Principal,
    ) -> Result<Option<Subscription>, ProviderError>;
}

/// Wire shape of a provider customer; only the id is needed here.
#[derive(Debug, Deserialize)]
struct Customer {
    id: CustomerId,
}

#[async_trait]
impl SubscriptionProvider for StripeClient {
    async fn active_subscription(
        &self,
        principal: &Principal,
    ) -> Result<Option<Subscription>, ProviderError> {
        let customers: ListEnvelope<Customer> = self
            .get(
                "/v1/customers",
                &[("email", principal.email.as_str()), ("limit", "1")],
            )
            .await?;

        let Some(customer) = customers.data.into_iter().next() else {
            return Ok(None);
        };

        let subscriptions: ListEnvelope<Subscription> = self
            .get(
                "/v1/subscriptions",
                &[
                    ("customer", customer.id.0.as_str()),
                    ("status", "all"),
                    ("limit", "1"),
                ],
            )
            .await?;

        Ok(subscriptions.data.into_iter().next())
    }
}
