//! Main entry point for the VetPR practice management server.
//!
//! Boots the full system: resolves configuration from the environment, seeds
//! the default practitioner roster, enriches practitioners without a profile
//! photo from the random-user API (concurrently, failures logged and
//! skipped), then serves the REST API.

use api_rest::{build_router, AppState};
use randomuser::RandomUserClient;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vetpr_core::config::{practice_time_from_env_value, slot_minutes_from_env_value};
use vetpr_core::constants::{DEFAULT_CLOSING_HOUR, DEFAULT_OPENING_HOUR, DEFAULT_PRACTICE_DATA_DIR};
use vetpr_core::repositories::PractitionerService;
use vetpr_core::CoreConfig;

/// Main entry point for the VetPR server
///
/// # Environment Variables
/// - `VETPR_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `VETPR_DATA_DIR`: Directory for practice data (default: "practice_data")
/// - `VETPR_CLINIC_NAME`: Clinic display name
/// - `VETPR_OPENING` / `VETPR_CLOSING`: Practice hours, HH:MM
/// - `VETPR_SLOT_MINUTES`: Slot length in minutes
/// - `VETPR_PHOTO_API`: Photo API base URL, or "off" to disable enrichment
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vetpr=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("VETPR_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = Arc::new(config_from_env()?);
    tracing::info!(
        "++ Starting {} on {} (data dir: {})",
        cfg.clinic_name(),
        rest_addr,
        cfg.practice_data_dir().display()
    );

    let photos = match std::env::var("VETPR_PHOTO_API").ok().as_deref() {
        Some("off") => None,
        Some(base_url) => Some(Arc::new(RandomUserClient::with_base_url(base_url)?)),
        None => Some(Arc::new(RandomUserClient::new()?)),
    };

    let practitioners = PractitionerService::new(cfg.clone());
    let roster = practitioners.seed_defaults()?;
    tracing::info!("practitioner roster ready: {} entries", roster.len());

    if let Some(photos) = &photos {
        enrich_practitioner_photos(&practitioners, photos, roster).await;
    }

    let app = build_router(AppState { cfg, photos });

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Fetches profile photos for practitioners that have none yet.
///
/// Fetches run concurrently; a failed fetch leaves the practitioner without a
/// photo and logs a warning — startup never fails because the photo API is
/// down.
async fn enrich_practitioner_photos(
    practitioners: &PractitionerService,
    photos: &Arc<RandomUserClient>,
    roster: Vec<vetpr_core::Practitioner>,
) {
    let mut fetches = JoinSet::new();
    for practitioner in roster {
        if practitioner.photo_url.is_some() {
            continue;
        }
        let client = Arc::clone(photos);
        fetches.spawn(async move {
            let result = client.portrait_url().await;
            (practitioner.name, result)
        });
    }

    while let Some(joined) = fetches.join_next().await {
        let Ok((name, result)) = joined else {
            continue;
        };
        match result {
            Ok(url) => {
                if let Err(e) = practitioners.set_photo(&name, url) {
                    tracing::warn!("could not store photo for {name}: {e}");
                }
            }
            Err(e) => {
                tracing::warn!("no photo for {name}: {e}");
            }
        }
    }
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
