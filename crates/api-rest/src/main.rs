//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging when you only want the REST server
//! (with OpenAPI/Swagger UI) against an already-seeded data directory. The
//! workspace's main `vetpr-run` binary also seeds the practitioner roster and
//! enriches profile photos before serving.

use api_rest::{build_router, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vetpr_core::config::{practice_time_from_env_value, slot_minutes_from_env_value};
use vetpr_core::constants::{DEFAULT_CLOSING_HOUR, DEFAULT_OPENING_HOUR, DEFAULT_PRACTICE_DATA_DIR};
use vetpr_core::CoreConfig;

/// Main entry point for the VetPR REST API server
///
/// Starts the REST API server on the configured address (default:
/// 0.0.0.0:3000) with OpenAPI/Swagger documentation.
///
/// # Environment Variables
/// - `VETPR_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `VETPR_DATA_DIR`: Directory for practice data (default: "practice_data")
/// - `VETPR_CLINIC_NAME`: Clinic display name
/// - `VETPR_OPENING` / `VETPR_CLOSING`: Practice hours, HH:MM
/// - `VETPR_SLOT_MINUTES`: Slot length in minutes
/// - `VETPR_PHOTO_API`: Photo API base URL, or "off" to disable enrichment
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration values are invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("VETPR_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting VetPR REST API on {}", addr);

    let cfg = Arc::new(config_from_env()?);
    let photos = match std::env::var("VETPR_PHOTO_API").ok().as_deref() {
        Some("off") => None,
        Some(base_url) => Some(Arc::new(randomuser::RandomUserClient::with_base_url(
            base_url,
        )?)),
        None => Some(Arc::new(randomuser::RandomUserClient::new()?)),
    };

    let app = build_router(AppState { cfg, photos });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Resolves the core configuration from the environment, once, at startup.
fn config_from_env() -> anyhow::Result<CoreConfig> {
    let data_dir = std::env::var("VETPR_DATA_DIR")
        .unwrap_or_else(|_| DEFAULT_PRACTICE_DATA_DIR.into());
    let clinic_name =
        std::env::var("VETPR_CLINIC_NAME").unwrap_or_else(|_| "VetPR Practice".into());

    let opening = practice_time_from_env_value(
        std::env::var("VETPR_OPENING").ok(),
        chrono::NaiveTime::from_hms_opt(DEFAULT_OPENING_HOUR, 0, 0)
            .expect("default opening hour is a valid time"),
    )?;
    let closing = practice_time_from_env_value(
        std::env::var("VETPR_CLOSING").ok(),
        chrono::NaiveTime::from_hms_opt(DEFAULT_CLOSING_HOUR, 0, 0)
            .expect("default closing hour is a valid time"),
    )?;
    let slot_minutes = slot_minutes_from_env_value(std::env::var("VETPR_SLOT_MINUTES").ok())?;

    Ok(CoreConfig::new(
        PathBuf::from(data_dir),
        clinic_name,
        opening,
        closing,
        slot_minutes,
    )?)
}
