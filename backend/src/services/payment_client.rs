//! Payment-provider client.
//!
//! [`PaymentClient`] is the interface the invoice gates depend on;
//! [`StripeClient`] is the HTTP implementation against the provider's REST
//! API. The singular fetch collapses every failure to "absent" (and logs it)
//! because callers must not be able to distinguish a missing invoice from a
//! failed lookup.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::Config;
use crate::errors::ProviderError;
use crate::models::{CustomerId, Invoice, InvoiceId, ListEnvelope};

/// Invoice retrieval operations delegated to the payment provider.
#[async_trait]
pub trait PaymentClient: Send + Sync {
    /// Fetches the full invoice collection for one customer. An empty
    /// collection is a success, not an error.
    async fn fetch_invoice_collection(
        &self,
        customer: &CustomerId,
    ) -> Result<ListEnvelope<Invoice>, ProviderError>;

    /// Fetches a single invoice by id. Provider failures collapse to `None`.
    async fn fetch_invoice(&self, id: &InvoiceId) -> Option<Invoice>;
}

/// HTTP client for the payment provider's REST API.
pub struct StripeClient {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl StripeClient {
    /// Creates a client from the provider settings in `config`. The request
    /// timeout configured here is the only timeout policy in this slice.
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.provider_timeout_seconds))
            .build()?;

        Ok(StripeClient {
            http,
            base_url: config.provider_api_base.trim_end_matches('/').to_string(),
            secret_key: config.provider_secret_key.clone(),
        })
    }

    /// Issues an authenticated GET and decodes the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.secret_key)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PaymentClient for StripeClient {
    async fn fetch_invoice_collection(
        &self,
        customer: &CustomerId,
    ) -> Result<ListEnvelope<Invoice>, ProviderError> {
        self.get("/v1/invoices", &[("customer", customer.0.as_str())])
            .await
    }

    async fn fetch_invoice(&self, id: &InvoiceId) -> Option<Invoice> {
        let path = format!("/v1/invoices/{id}");
        match self.get::<Invoice>(&path, &[]).await {
            Ok(invoice) => Some(invoice),
            Err(err) => {
                tracing::warn!(error = %err, invoice = %id, "invoice fetch collapsed to absent");
                None
            }
        }
    }
}
