// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Canitrail API Server
//!
//! Ingests GPX track logs from the club's members, derives trail
//! statistics, and serves persisted tracks back for display.

use canitrail::{
    config::Config,
    db::TracksDb,
    services::{GeocoderClient, StorageClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Canitrail API");

    // Collaborator clients: database, blob storage, reverse geocoder
    let db = TracksDb::new(&config.supabase_url, &config.supabase_service_key);
    let storage = StorageClient::new(
        &config.supabase_url,
        &config.supabase_service_key,
        &config.gpx_bucket,
    );
    tracing::info!(bucket = %config.gpx_bucket, "Storage client initialized");

    let geocoder = GeocoderClient::new(&config.geocoder_url);
    tracing::info!(url = %config.geocoder_url, "Geocoder client initialized");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        storage,
        geocoder,
    });

    // Build router
    let app = canitrail::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("canitrail=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
