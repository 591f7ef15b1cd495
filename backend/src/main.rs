//! Main entry point for the Billgate backend.
//!
//! This file initializes the Axum web server, builds the collaborator
//! clients from configuration, and registers the guarded billing routes.

mod api;
mod auth;
mod config;
mod errors;
mod models;
mod pipeline;
mod services;
mod state;
mod views;

use std::sync::Arc;

use anyhow::Context;
use axum::{Extension, Json, Router, routing::get};
use serde_json::{Value, json};
use tracing::info;
use tracing_subscriber::fmt::init;

use crate::api::common::INVOICES_PATH;
use crate::auth::session::JwtSessions;
use crate::config::Config;
use crate::services::payment_client::StripeClient;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();

    let config = Config::from_env()?;

    let sessions = Arc::new(JwtSessions::new(
        &config.session_secret,
        config.session_ttl_seconds,
    ));
    let stripe = Arc::new(
        StripeClient::new(&config).context("could not build the payment-provider client")?,
    );

    let state = AppState::new(sessions, stripe.clone(), stripe);

    let app = Router::new()
        .route("/", get(root_handler))
        .nest(INVOICES_PATH, api::invoice::routes::invoice_router())
        .layer(Extension(state));

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("could not bind {bind_address}"))?;

    info!("Starting Billgate server on port {}", config.server_port);
    axum::serve(listener, app).await.context("server exited")?;
    Ok(())
}

async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": "Billgate Backend",
        "version": "0.1.0"
    }))
}
