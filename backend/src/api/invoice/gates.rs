//! Gates that resolve invoices through the payment provider.

use async_trait::async_trait;
use std::sync::Arc;

use crate::api::common::denial_response;
use crate::errors::GateDenial;
use crate::pipeline::{Gate, GateContext, Outcome};
use crate::services::payment_client::PaymentClient;

/// Fetches the invoice collection for the resolved subscription's customer.
///
/// Must run after the subscription gate. A provider failure is logged and
/// short-circuits to the account overview with a generic flash; there is no
/// retry. An empty collection continues normally.
pub struct FetchInvoices {
    payment: Arc<dyn PaymentClient>,
}

impl FetchInvoices {
    pub fn new(payment: Arc<dyn PaymentClient>) -> Self {
        FetchInvoices { payment }
    }
}

#[async_trait]
impl Gate for FetchInvoices {
    async fn evaluate(&self, ctx: GateContext) -> Outcome {
        let Some(customer) = ctx.subscription().map(|s| s.customer.clone()) else {
            tracing::error!("invoice collection gate ran before subscription resolution");
            return Outcome::ShortCircuit(denial_response(
                GateDenial::ProviderFetchFailed,
                ctx.request_path(),
            ));
        };

        match self.payment.fetch_invoice_collection(&customer).await {
            Ok(invoices) => Outcome::Continue(ctx.with_invoices(invoices)),
            Err(err) => {
                tracing::error!(
                    error = %err,
                    %customer,
                    subject = "Couldn't load invoices",
                    "invoice collection fetch failed"
                );
                Outcome::ShortCircuit(denial_response(
                    GateDenial::ProviderFetchFailed,
                    ctx.request_path(),
                ))
            }
        }
    }
}

/// Fetches the requested invoice and verifies the customer on the resolved
/// subscription owns it.
///
/// Must run after the subscription gate, on a context seeded with an invoice
/// id. Absent invoices and ownership mismatches produce the identical
/// response so the existence of other customers' invoices never leaks.
pub struct RequireInvoice {
    payment: Arc<dyn PaymentClient>,
}

impl RequireInvoice {
    pub fn new(payment: Arc<dyn PaymentClient>) -> Self {
        RequireInvoice { payment }
    }
}

#[async_trait]
impl Gate for RequireInvoice {
    async fn evaluate(&self, ctx: GateContext) -> Outcome {
        let denied = |ctx: &GateContext| {
            Outcome::ShortCircuit(denial_response(
                GateDenial::ResourceNotFoundOrNotOwned,
                ctx.request_path(),
            ))
        };

        let (Some(id), Some(subscription)) = (ctx.invoice_id().cloned(), ctx.subscription())
        else {
            tracing::error!("invoice gate ran without an invoice id or subscription");
            return denied(&ctx);
        };

        let Some(invoice) = self.payment.fetch_invoice(&id).await else {
            return denied(&ctx);
        };

        // Pure ownership predicate over already-resolved fields.
        if invoice.customer != subscription.customer {
            tracing::warn!(
                invoice = %invoice.id,
                "invoice belongs to a different customer, answering as not found"
            );
            return denied(&ctx);
        }

        Outcome::Continue(ctx.with_invoice(invoice))
    }
}
