//! Global application error types.
//!
//! This module defines the error taxonomy shared across the backend. Every
//! pipeline failure in the billing slice resolves to a redirect, so these
//! types exist to be logged and classified, never rendered to the user.

use thiserror::Error;

/// Represents errors that can occur while talking to the payment provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced a usable response (DNS, connect, timeout).
    #[error("provider request failed: {0}")]
    Transport(String),
    /// The provider answered with a non-success status.
    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body did not match the expected shape.
    #[error("could not decode provider response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

/// Why a gate refused to let a request continue. Each reason maps to exactly
/// one redirect destination; the mapping lives with the gates themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDenial {
    /// No authenticated principal on the request.
    Unauthenticated,
    /// Principal exists but holds no qualifying subscription.
    NoActiveSubscription,
    /// The provider collection fetch failed.
    ProviderFetchFailed,
    /// Invoice absent, or present but owned by another customer. The two
    /// cases are deliberately indistinguishable to the user.
    ResourceNotFoundOrNotOwned,
}
