//! Facecloud API
//!
//! HTTP service exposing face segmentation over uploaded images.
//! The face segmentation routes live in their own router, mounted under
//! `/face_segmentation` of the root application.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;

use crate::api::AppState;
use crate::config::Config;
use facecloud_vision::YcbcrSkinDetector;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "facecloud_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Facecloud API...");

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    tracing::info!(
        "Loaded configuration: bind_addr={}, max_upload_bytes={}",
        config.bind_addr,
        config.max_upload_bytes
    );

    let state = AppState::new(Arc::new(YcbcrSkinDetector::new()));

    // Build router with the mounted sub-application
    let app = api::create_router(state, &config);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to address {}", config.bind_addr))?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
