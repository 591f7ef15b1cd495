//! The progressively-resolved request context threaded through the gates.

use crate::models::{Invoice, InvoiceId, ListEnvelope, Principal, Subscription};

/// Accumulating bundle of resolved values for one request.
///
/// The context starts with only the raw request data (path, session token,
/// optional invoice id from the route) and gains fields as gates resolve
/// them. A gate must only read fields that an earlier gate in the chain
/// resolves; that ordering is a property of how the pipeline is assembled
/// and is pinned down by the tests next to each gate.
#[derive(Debug, Clone, Default)]
pub struct GateContext {
    request_path: String,
    session_token: Option<String>,
    invoice_id: Option<InvoiceId>,
    principal: Option<Principal>,
    subscription: Option<Subscription>,
    invoices: Option<ListEnvelope<Invoice>>,
    invoice: Option<Invoice>,
}

impl GateContext {
    /// Creates a context for a request to `request_path`. The path is kept
    /// so an authentication short-circuit can send the user back here after
    /// login.
    pub fn new(request_path: impl Into<String>) -> Self {
        GateContext {
            request_path: request_path.into(),
            ..GateContext::default()
        }
    }

    pub fn with_session_token(mut self, token: Option<String>) -> Self {
        self.session_token = token;
        self
    }

    pub fn with_invoice_id(mut self, id: InvoiceId) -> Self {
        self.invoice_id = Some(id);
        self
    }

    pub fn with_principal(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn with_subscription(mut self, subscription: Subscription) -> Self {
        self.subscription = Some(subscription);
        self
    }

    pub fn with_invoices(mut self, invoices: ListEnvelope<Invoice>) -> Self {
        self.invoices = Some(invoices);
        self
    }

    pub fn with_invoice(mut self, invoice: Invoice) -> Self {
        self.invoice = Some(invoice);
        self
    }

    pub fn request_path(&self) -> &str {
        &self.request_path
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    pub fn invoice_id(&self) -> Option<&InvoiceId> {
        self.invoice_id.as_ref()
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn subscription(&self) -> Option<&Subscription> {
        self.subscription.as_ref()
    }

    pub fn invoices(&self) -> Option<&ListEnvelope<Invoice>> {
        self.invoices.as_ref()
    }

    pub fn invoice(&self) -> Option<&Invoice> {
        self.invoice.as_ref()
    }
}
