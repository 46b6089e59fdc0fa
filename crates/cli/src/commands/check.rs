//! Content store connectivity check.
//!
//! Unlike the catalog commands, this surfaces the underlying error instead
//! of degrading to an empty result.

use coastal_surf_storefront::config::CosmicConfig;
use coastal_surf_storefront::cosmic::CosmicClient;
use tracing::{error, info};

/// Query the bucket once and report the outcome.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the store cannot be
/// queried with the configured key.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = CosmicConfig::from_env()?;
    info!(
        bucket = %config.bucket_slug,
        environment = ?config.environment,
        api = %config.base_url(),
        "Checking content store"
    );

    let client = CosmicClient::new(&config)?;
    match client.ping().await {
        Ok(()) => {
            info!(bucket = %config.bucket_slug, "Content store reachable");
            Ok(())
        }
        Err(e) => {
            error!(bucket = %config.bucket_slug, error = %e, "Content store check failed");
            Err(e.into())
        }
    }
}
