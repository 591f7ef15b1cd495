//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the server port, session signing secret, and payment-provider credentials.

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub session_secret: String,
    pub session_ttl_seconds: u64,
    pub provider_api_base: String,
    pub provider_secret_key: String,
    pub provider_timeout_seconds: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        let session_secret = env::var("SESSION_SECRET").context("SESSION_SECRET not set")?;

        let session_ttl_seconds = env::var("SESSION_TTL_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse::<u64>()
            .context("SESSION_TTL_SECONDS must be a valid number")?;

        let provider_api_base = env::var("PROVIDER_API_BASE")
            .unwrap_or_else(|_| "https://api.stripe.com".to_string());

        let provider_secret_key =
            env::var("PROVIDER_SECRET_KEY").context("PROVIDER_SECRET_KEY not set")?;

        let provider_timeout_seconds = env::var("PROVIDER_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .context("PROVIDER_TIMEOUT_SECONDS must be a valid number")?;

        Ok(Config {
            server_port,
            session_secret,
            session_ttl_seconds,
            provider_api_base,
            provider_secret_key,
            provider_timeout_seconds,
        })
    }
}
