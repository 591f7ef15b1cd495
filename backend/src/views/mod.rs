//! View rendering for the billing pages.
//!
//! Views are pure functions from resolved request data to HTML; the layout
//! wrapper adds the page title, optional flash banner, and site chrome.

pub mod invoices;
pub mod layout;

pub use invoices::{invoice_view, invoices_view};
pub use layout::{LayoutStyle, PageLayout, render_page};
