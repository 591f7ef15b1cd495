//! Response plumbing shared by the API handlers and gates.
//!
//! Provides the redirect responder, one-shot flash messages, and the mapping
//! from gate denials to user-facing redirects. Includes:
//! - Flash message encoding into a one-shot cookie
//! - Redirect responses with an optional attached flash
//! - The denial-to-redirect table from the error taxonomy
//!
//! # Flash Cookies
//! A flash is serialized to JSON, base64-encoded, and set as a short-lived
//! cookie on the redirect. The next rendered page reads it, shows it once,
//! and clears the cookie.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};

use crate::errors::GateDenial;

/// Cookie carrying the one-shot flash message.
pub const FLASH_COOKIE: &str = "billgate_flash";

/// Where a denial sends the user.
pub const LOGIN_PATH: &str = "/login";
pub const PRICING_PATH: &str = "/pricing";
pub const ACCOUNT_PATH: &str = "/account";
pub const INVOICES_PATH: &str = "/account/invoices";

/// Shown when the invoice collection could not be loaded.
pub const INVOICES_ERROR: &str = "We had some trouble loading your invoices! \
     Please try again later. If the problem persists, please notify \
     <support@billgate.io>.";

/// Shown when a single invoice is absent or belongs to another customer.
pub const INVOICE_ERROR: &str = "We had some trouble loading your invoice! \
     Please try again later. If the problem persists, please notify \
     <support@billgate.io>.";

/// Severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Error,
    Notice,
}

/// One-shot user-visible message attached to a redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn error(message: impl Into<String>) -> Self {
        Flash {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Flash {
            level: FlashLevel::Notice,
            message: message.into(),
        }
    }

    /// Encodes the flash for transport in a cookie value.
    pub fn encode(&self) -> String {
        // Serialization of a two-field struct of plain data cannot fail.
        let json = serde_json::to_string(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Decodes a cookie value produced by [`Flash::encode`].
    pub fn decode(value: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

/// Builds a 302 redirect to `location`, attaching `flash` as a one-shot
/// cookie when present.
pub fn redirect(location: &str, flash: Option<Flash>) -> Response {
    let mut response = StatusCode::FOUND.into_response();

    match HeaderValue::from_str(location) {
        Ok(value) => {
            response.headers_mut().insert(header::LOCATION, value);
        }
        Err(err) => {
            tracing::error!(%err, location, "redirect target is not a valid header value");
        }
    }

    if let Some(flash) = flash {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; Max-Age=300",
            FLASH_COOKIE,
            flash.encode()
        );
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }

    response
}

/// Redirect to the login page with a marker sending the user back to
/// `return_to` after authenticating.
pub fn login_redirect(return_to: &str) -> Response {
    let destination = format!(
        "{}?redirect={}",
        LOGIN_PATH,
        encode_query_component(return_to)
    );
    redirect(&destination, None)
}

/// Maps a gate denial to its redirect. `return_to` is only consulted for the
/// unauthenticated case, where it becomes the post-login destination.
pub fn denial_response(denial: GateDenial, return_to: &str) -> Response {
    match denial {
        GateDenial::Unauthenticated => login_redirect(return_to),
        GateDenial::NoActiveSubscription => redirect(PRICING_PATH, None),
        GateDenial::ProviderFetchFailed => {
            redirect(ACCOUNT_PATH, Some(Flash::error(INVOICES_ERROR)))
        }
        GateDenial::ResourceNotFoundOrNotOwned => {
            redirect(INVOICES_PATH, Some(Flash::error(INVOICE_ERROR)))
        }
    }
}

/// Reads the flash cookie from the inbound request headers, if present.
pub fn flash_from_headers(headers: &axum::http::HeaderMap) -> Option<Flash> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == FLASH_COOKIE {
            Flash::decode(value)
        } else {
            None
        }
    })
}

/// Percent-encodes a string for use as a URL query component.
pub fn encode_query_component(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}
