//! Invoice pages: the gates, handlers, and routes for payment history.

pub mod gates;
pub mod handlers;
pub mod routes;
