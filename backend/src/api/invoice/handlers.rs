//! Handlers for the payment-history pages.
//!
//! Each handler seeds a [`GateContext`] from the inbound request, assembles
//! the gate pipeline for its route, and renders the page from the
//! fully-resolved context. Every guard failure resolves to a redirect, so
//! these handlers never return an error status themselves.

use axum::extract::{Extension, Path};
use axum::http::HeaderMap;
use axum::response::Response;

use crate::api::common::{ACCOUNT_PATH, Flash, INVOICES_PATH, flash_from_headers, redirect};
use crate::auth::gates::{RequirePrincipal, RequireSubscription};
use crate::auth::session::session_token_from_headers;
use crate::models::InvoiceId;
use crate::pipeline::{GateContext, Pipeline};
use crate::state::AppState;
use crate::views::{PageLayout, invoice_view, invoices_view, render_page};

use super::gates::{FetchInvoices, RequireInvoice};

/// Handler for the invoice list page.
#[axum::debug_handler]
pub async fn invoices(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Response {
    let ctx = GateContext::new(INVOICES_PATH)
        .with_session_token(session_token_from_headers(&headers));
    let flash = flash_from_headers(&headers);

    let pipeline = Pipeline::new()
        .gate(RequirePrincipal::new(state.sessions.clone()))
        .gate(RequireSubscription::new(state.subscriptions.clone()))
        .gate(FetchInvoices::new(state.payment.clone()));

    pipeline
        .respond(ctx, move |ctx| render_invoices(ctx, flash))
        .await
}

/// Handler for a single invoice page.
#[axum::debug_handler]
pub async fn invoice(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let request_path = format!("{INVOICES_PATH}/{id}");
    let ctx = GateContext::new(request_path)
        .with_session_token(session_token_from_headers(&headers))
        .with_invoice_id(InvoiceId(id));
    let flash = flash_from_headers(&headers);

    let pipeline = Pipeline::new()
        .gate(RequirePrincipal::new(state.sessions.clone()))
        .gate(RequireSubscription::new(state.subscriptions.clone()))
        .gate(RequireInvoice::new(state.payment.clone()));

    pipeline
        .respond(ctx, move |ctx| render_invoice(ctx, flash))
        .await
}

fn render_invoices(ctx: GateContext, flash: Option<Flash>) -> Response {
    let (Some(subscription), Some(principal), Some(invoices)) =
        (ctx.subscription(), ctx.principal(), ctx.invoices())
    else {
        tracing::error!("invoice list responder reached with an unresolved context");
        return redirect(ACCOUNT_PATH, None);
    };

    let body = invoices_view(subscription, invoices, principal);
    render_page(&PageLayout::new("Payment history"), flash.as_ref(), &body)
}

fn render_invoice(ctx: GateContext, flash: Option<Flash>) -> Response {
    let (Some(subscription), Some(principal), Some(invoice)) =
        (ctx.subscription(), ctx.principal(), ctx.invoice())
    else {
        tracing::error!("invoice responder reached with an unresolved context");
        return redirect(ACCOUNT_PATH, None);
    };

    let body = invoice_view(subscription, principal, invoice);
    render_page(&PageLayout::minimal("Invoice"), flash.as_ref(), &body)
}
