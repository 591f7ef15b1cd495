//! Authentication module: session resolution and the gates that enforce it.
//!
//! This module provides the session-provider interface used to turn an
//! inbound session cookie into a [`crate::models::Principal`], a JWT-backed
//! default implementation, and the pipeline gates that require an
//! authenticated principal and a qualifying subscription.

pub mod gates;
pub mod session;

pub use gates::{RequirePrincipal, RequireSubscription};
pub use session::{JwtSessions, SessionProvider};
