//! Gates enforcing authentication and subscription requirements.

use async_trait::async_trait;
use std::sync::Arc;

use crate::api::common::denial_response;
use crate::errors::GateDenial;
use crate::pipeline::{Gate, GateContext, Outcome};
use crate::services::subscription_service::SubscriptionProvider;

use super::session::SessionProvider;

/// Requires an authenticated principal on the request.
///
/// Resolves the session token through the session provider and extends the
/// context with the principal. Absent or invalid sessions short-circuit to
/// the login page with a marker sending the user back here afterwards.
pub struct RequirePrincipal {
    sessions: Arc<dyn SessionProvider>,
}

impl RequirePrincipal {
    pub fn new(sessions: Arc<dyn SessionProvider>) -> Self {
        RequirePrincipal { sessions }
    }
}

#[async_trait]
impl Gate for RequirePrincipal {
    async fn evaluate(&self, ctx: GateContext) -> Outcome {
        let Some(token) = ctx.session_token().map(str::to_owned) else {
            return Outcome::ShortCircuit(denial_response(
                GateDenial::Unauthenticated,
                ctx.request_path(),
            ));
        };

        match self.sessions.current_principal(&token).await {
            Some(principal) => Outcome::Continue(ctx.with_principal(principal)),
            None => Outcome::ShortCircuit(denial_response(
                GateDenial::Unauthenticated,
                ctx.request_path(),
            )),
        }
    }
}

/// Requires a qualifying subscription for the already-resolved principal.
///
/// Must run after [`RequirePrincipal`]. Missing or non-qualifying
/// subscriptions short-circuit to the upsell page; lookup failures are
/// logged and treated the same way.
pub struct RequireSubscription {
    subscriptions: Arc<dyn SubscriptionProvider>,
}

impl RequireSubscription {
    pub fn new(subscriptions: Arc<dyn SubscriptionProvider>) -> Self {
        RequireSubscription { subscriptions }
    }
}

#[async_trait]
impl Gate for RequireSubscription {
    async fn evaluate(&self, ctx: GateContext) -> Outcome {
        let Some(principal) = ctx.principal().cloned() else {
            tracing::error!("subscription gate ran before principal resolution");
            return Outcome::ShortCircuit(denial_response(
                GateDenial::Unauthenticated,
                ctx.request_path(),
            ));
        };

        match self.subscriptions.active_subscription(&principal).await {
            Ok(Some(subscription)) if subscription.status.is_qualifying() => {
                Outcome::Continue(ctx.with_subscription(subscription))
            }
            Ok(_) => Outcome::ShortCircuit(denial_response(
                GateDenial::NoActiveSubscription,
                ctx.request_path(),
            )),
            Err(err) => {
                tracing::error!(error = %err, principal = %principal.id, "subscription lookup failed");
                Outcome::ShortCircuit(denial_response(
                    GateDenial::NoActiveSubscription,
                    ctx.request_path(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::{INVOICES_PATH, PRICING_PATH};
    use crate::errors::ProviderError;
    use crate::models::{
        CustomerId, Principal, Subscription, SubscriptionId, SubscriptionStatus,
    };
    use axum::http::{StatusCode, header};
    use chrono::Utc;
    use uuid::Uuid;

    struct StaticSessions {
        principal: Option<Principal>,
    }

    #[async_trait]
    impl SessionProvider for StaticSessions {
        async fn current_principal(&self, _token: &str) -> Option<Principal> {
            self.principal.clone()
        }
    }

    struct StaticSubscriptions {
        result: Result<Option<Subscription>, ()>,
    }

    #[async_trait]
    impl SubscriptionProvider for StaticSubscriptions {
        async fn active_subscription(
            &self,
            _principal: &Principal,
        ) -> Result<Option<Subscription>, ProviderError> {
            self.result
                .clone()
                .map_err(|_| ProviderError::Transport("boom".into()))
        }
    }

    fn principal() -> Principal {
        Principal {
            id: Uuid::now_v7(),
            email: "blob@example.com".into(),
            name: None,
        }
    }

    fn subscription(status: SubscriptionStatus) -> Subscription {
        Subscription {
            id: SubscriptionId("sub_1".into()),
            customer: CustomerId("cus_1".into()),
            status,
            current_period_end: Utc::now(),
        }
    }

    fn location(outcome: Outcome) -> String {
        match outcome {
            Outcome::ShortCircuit(response) => {
                assert_eq!(response.status(), StatusCode::FOUND);
                response
                    .headers()
                    .get(header::LOCATION)
                    .unwrap()
                    .to_str()
                    .unwrap()
                    .to_string()
            }
            Outcome::Continue(_) => panic!("expected a short-circuit"),
        }
    }

    #[tokio::test]
    async fn missing_session_token_redirects_to_login_with_return_marker() {
        let gate = RequirePrincipal::new(Arc::new(StaticSessions {
            principal: Some(principal()),
        }));
        let ctx = GateContext::new(INVOICES_PATH);

        let loc = location(gate.evaluate(ctx).await);
        assert_eq!(loc, "/login?redirect=%2Faccount%2Finvoices");
    }

    #[tokio::test]
    async fn unresolvable_session_redirects_to_login() {
        let gate = RequirePrincipal::new(Arc::new(StaticSessions { principal: None }));
        let ctx =
            GateContext::new(INVOICES_PATH).with_session_token(Some("stale".into()));

        let loc = location(gate.evaluate(ctx).await);
        assert!(loc.starts_with("/login?redirect="));
    }

    #[tokio::test]
    async fn valid_session_extends_the_context_with_the_principal() {
        let expected = principal();
        let gate = RequirePrincipal::new(Arc::new(StaticSessions {
            principal: Some(expected.clone()),
        }));
        let ctx =
            GateContext::new(INVOICES_PATH).with_session_token(Some("token".into()));

        match gate.evaluate(ctx).await {
            Outcome::Continue(ctx) => assert_eq!(ctx.principal(), Some(&expected)),
            Outcome::ShortCircuit(_) => panic!("expected the gate to continue"),
        }
    }

    #[tokio::test]
    async fn missing_subscription_redirects_to_pricing() {
        let gate = RequireSubscription::new(Arc::new(StaticSubscriptions {
            result: Ok(None),
        }));
        let ctx = GateContext::new(INVOICES_PATH).with_principal(principal());

        assert_eq!(location(gate.evaluate(ctx).await), PRICING_PATH);
    }

    #[tokio::test]
    async fn canceled_subscription_redirects_to_pricing() {
        let gate = RequireSubscription::new(Arc::new(StaticSubscriptions {
            result: Ok(Some(subscription(SubscriptionStatus::Canceled))),
        }));
        let ctx = GateContext::new(INVOICES_PATH).with_principal(principal());

        assert_eq!(location(gate.evaluate(ctx).await), PRICING_PATH);
    }

    #[tokio::test]
    async fn lookup_failure_is_treated_as_no_subscription() {
        let gate = RequireSubscription::new(Arc::new(StaticSubscriptions {
            result: Err(()),
        }));
        let ctx = GateContext::new(INVOICES_PATH).with_principal(principal());

        assert_eq!(location(gate.evaluate(ctx).await), PRICING_PATH);
    }

    #[tokio::test]
    async fn qualifying_subscription_extends_the_context() {
        let expected = subscription(SubscriptionStatus::Trialing);
        let gate = RequireSubscription::new(Arc::new(StaticSubscriptions {
            result: Ok(Some(expected.clone())),
        }));
        let owner = principal();
        let ctx = GateContext::new(INVOICES_PATH).with_principal(owner.clone());

        match gate.evaluate(ctx).await {
            Outcome::Continue(ctx) => {
                assert_eq!(ctx.subscription(), Some(&expected));
                assert_eq!(ctx.principal(), Some(&owner));
            }
            Outcome::ShortCircuit(_) => panic!("expected the gate to continue"),
        }
    }

    #[tokio::test]
    async fn subscription_gate_without_principal_falls_back_to_login() {
        let gate = RequireSubscription::new(Arc::new(StaticSubscriptions {
            result: Ok(Some(subscription(SubscriptionStatus::Active))),
        }));
        let ctx = GateContext::new(INVOICES_PATH);

        let loc = location(gate.evaluate(ctx).await);
        assert!(loc.starts_with("/login?redirect="));
    }
}
