//! Module for collaborator services.
//!
//! This module encapsulates the clients the pipeline delegates to: the
//! payment-provider HTTP client used to fetch invoices and the
//! subscription-lookup service built on top of it.

pub mod payment_client;
pub mod subscription_service;

pub use payment_client::{PaymentClient, StripeClient};
pub use subscription_service::SubscriptionProvider;
