//! Session tokens and the session-provider interface.
//!
//! Sessions are HS256 JWTs carried in a cookie. Token validation failures of
//! any kind collapse to "no principal"; callers decide what an absent
//! principal means for the request.

use async_trait::async_trait;
use axum::http::{HeaderMap, header};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Principal;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "billgate_session";

/// Claims stored in a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Principal id.
    pub sub: Uuid,
    pub email: String,
    pub name: Option<String>,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// Resolves a session token to the authenticated principal, if any.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_principal(&self, token: &str) -> Option<Principal>;
}

/// JWT-backed session provider.
pub struct JwtSessions {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl JwtSessions {
    /// Creates a provider signing and verifying with `secret`.
    pub fn new(secret: &str, ttl_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        JwtSessions {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_seconds,
        }
    }

    /// Issues a session token for `principal`, valid for the configured TTL.
    pub fn issue_token(
        &self,
        principal: &Principal,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.ttl_seconds as i64);

        let claims = SessionClaims {
            sub: principal.id,
            email: principal.email.clone(),
            name: principal.name.clone(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }
}

#[async_trait]
impl SessionProvider for JwtSessions {
    async fn current_principal(&self, token: &str) -> Option<Principal> {
        match decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(Principal {
                id: data.claims.sub,
                email: data.claims.email,
                name: data.claims.name,
            }),
            Err(err) => {
                tracing::debug!(%err, "session token rejected");
                None
            }
        }
    }
}

/// Extracts the session token from the request's cookie header.
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            Some(value.to_string())
        } else {
            None
        }
    })
}
