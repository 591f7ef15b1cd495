//! Invoice list and invoice detail page bodies.

use std::fmt::Write as _;

use crate::models::{Invoice, ListEnvelope, Principal, Subscription};

use super::layout::escape_html;

/// Formats an amount in the currency's smallest unit, e.g. `18.00 USD`.
fn format_amount(amount: i64, currency: &str) -> String {
    format!(
        "{}.{:02} {}",
        amount / 100,
        (amount % 100).abs(),
        currency.to_uppercase()
    )
}

/// Body of the payment-history page.
pub fn invoices_view(
    subscription: &Subscription,
    invoices: &ListEnvelope<Invoice>,
    principal: &Principal,
) -> String {
    let mut body = String::new();
    let _ = write!(
        body,
        "<h1>Payment history</h1>\n<p>Billing for {} on subscription {}.</p>\n",
        escape_html(&principal.email),
        escape_html(&subscription.id.0)
    );

    if invoices.is_empty() {
        body.push_str("<p>No invoices yet.</p>");
        return body;
    }

    body.push_str("<table>\n<tr><th>Invoice</th><th>Date</th><th>Amount</th><th>Status</th></tr>\n");
    for invoice in &invoices.data {
        let number = invoice.number.as_deref().unwrap_or(invoice.id.0.as_str());
        let status = if invoice.paid { "Paid" } else { "Open" };
        let _ = write!(
            body,
            "<tr><td><a href=\"/account/invoices/{}\">{}</a></td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&invoice.id.0),
            escape_html(number),
            invoice.created.format("%b %-d, %Y"),
            format_amount(invoice.amount_due, &invoice.currency),
            status
        );
    }
    body.push_str("</table>");
    body
}

/// Body of the single-invoice page, rendered under the minimal layout so it
/// prints cleanly.
pub fn invoice_view(
    subscription: &Subscription,
    principal: &Principal,
    invoice: &Invoice,
) -> String {
    let number = invoice.number.as_deref().unwrap_or(invoice.id.0.as_str());
    let mut body = String::new();
    let _ = write!(
        body,
        "<h1>Invoice {}</h1>\n<p>Billed to {} (customer {}).</p>\n<p>Issued {}.</p>\n<p>Amount due: {}</p>\n<p>Status: {}</p>\n",
        escape_html(number),
        escape_html(&principal.email),
        escape_html(&subscription.customer.0),
        invoice.created.format("%B %-d, %Y"),
        format_amount(invoice.amount_due, &invoice.currency),
        if invoice.paid { "Paid" } else { "Open" }
    );

    if let Some(url) = &invoice.hosted_invoice_url {
        let _ = write!(
            body,
            "<p><a href=\"{}\">View on the payment provider</a></p>",
            escape_html(url)
        );
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CustomerId, InvoiceId, SubscriptionId, SubscriptionStatus};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn principal() -> Principal {
        Principal {
            id: Uuid::now_v7(),
            email: "blob@example.com".into(),
            name: None,
        }
    }

    fn subscription() -> Subscription {
        Subscription {
            id: SubscriptionId("sub_1".into()),
            customer: CustomerId("cus_1".into()),
            status: SubscriptionStatus::Active,
            current_period_end: Utc::now(),
        }
    }

    fn invoice() -> Invoice {
        Invoice {
            id: InvoiceId("in_1".into()),
            customer: CustomerId("cus_1".into()),
            number: Some("A1B2-0001".into()),
            amount_due: 1800,
            currency: "usd".into(),
            created: Utc.with_ymd_and_hms(2025, 3, 4, 0, 0, 0).unwrap(),
            paid: true,
            hosted_invoice_url: None,
        }
    }

    #[test]
    fn empty_collection_renders_an_empty_state() {
        let body = invoices_view(
            &subscription(),
            &ListEnvelope { data: vec![], has_more: false },
            &principal(),
        );
        assert!(body.contains("No invoices yet."));
        assert!(!body.contains("<table>"));
    }

    #[test]
    fn list_rows_link_to_the_invoice_detail_page() {
        let body = invoices_view(
            &subscription(),
            &ListEnvelope { data: vec![invoice()], has_more: false },
            &principal(),
        );
        assert!(body.contains("/account/invoices/in_1"));
        assert!(body.contains("A1B2-0001"));
        assert!(body.contains("18.00 USD"));
    }

    #[test]
    fn detail_page_shows_amount_and_status() {
        let body = invoice_view(&subscription(), &principal(), &invoice());
        assert!(body.contains("Invoice A1B2-0001"));
        assert!(body.contains("18.00 USD"));
        assert!(body.contains("Paid"));
    }
}
