//! Locale detection tool - resolves the display locale the way a first visit does
//!
//! Usage:
//!   cargo run --bin detect-locale             # Stored preference, else geolocation
//!   cargo run --bin detect-locale -- it       # Store a preference and exit
//!   cargo run --bin detect-locale -- --reset  # Forget the stored preference first
//!
//! Optional environment variables:
//! - LOCALE_STORE_PATH (defaults to .midas-touch-locale.json)
//! - GEO_TIMEOUT_SECS (defaults to 3)

use anyhow::{Context, Result};
use midastouch_site::config::Config;
use midastouch_site::geo::GeoLocator;
use midastouch_site::i18n::{FileStore, Locale, LocaleProvider, LocaleResolver};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("midastouch_site=info".parse()?)
                .add_directive("detect_locale=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let arg = std::env::args().nth(1);

    if arg.as_deref() == Some("--reset") {
        match std::fs::remove_file(&config.locale_store_path) {
            Ok(()) => info!("Removed {}", config.locale_store_path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to remove {}", config.locale_store_path)
                })
            }
        }
    }

    let store = Arc::new(FileStore::new(&config.locale_store_path));
    let geo = GeoLocator::with_default_providers(Duration::from_secs(config.geo_timeout_secs));
    let provider = LocaleProvider::new(LocaleResolver::new(store, geo));

    if let Some(code) = arg.as_deref().filter(|a| !a.starts_with("--")) {
        let locale = Locale::from_code(code)?;
        provider.set_locale(locale);
        info!("✓ Stored locale {} ({})", locale, locale.native_name());
        return Ok(());
    }

    let locale = provider.initialize().await;
    let strings = provider.strings();

    info!("✓ Locale: {} ({})", locale, locale.name());
    info!("  Contact headline: {}", strings.headline);
    info!("  Stored in {}", config.locale_store_path);

    Ok(())
}
