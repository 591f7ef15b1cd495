//! Shared application state injected into handlers.
//!
//! Collaborators are held as trait objects so handlers and gates depend on
//! interfaces, not concrete clients; tests swap in in-memory fakes.

use std::sync::Arc;

use crate::auth::session::SessionProvider;
use crate::services::payment_client::PaymentClient;
use crate::services::subscription_service::SubscriptionProvider;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionProvider>,
    pub subscriptions: Arc<dyn SubscriptionProvider>,
    pub payment: Arc<dyn PaymentClient>,
}

impl AppState {
    pub fn new(
        sessions: Arc<dyn SessionProvider>,
        subscriptions: Arc<dyn SubscriptionProvider>,
        payment: Arc<dyn PaymentClient>,
    ) -> Self {
        AppState {
            sessions,
            subscriptions,
            payment,
        }
    }
}
