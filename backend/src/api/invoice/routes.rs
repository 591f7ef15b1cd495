//! Routes for the payment-history pages.

use axum::{Router, routing::get};

use super::handlers::{invoice, invoices};

/// Router for the invoice pages; nest under `/account/invoices`.
pub fn invoice_router() -> Router {
    Router::new()
        .route("/", get(invoices))
        .route("/{id}", get(invoice))
}
