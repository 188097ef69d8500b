//! First-visit locale resolution.
//!
//! A stored preference always wins. Without one, the visitor's country is
//! looked up through the geolocation chain and mapped to a locale, and the
//! result is persisted so later visits skip the network entirely.

use crate::geo::GeoLocator;
use crate::i18n::{Locale, PreferenceStore};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Storage key holding the persisted locale tag.
pub const STORAGE_KEY: &str = "midas-touch-locale";

#[derive(Clone)]
pub struct LocaleResolver {
    store: Arc<dyn PreferenceStore>,
    geo: GeoLocator,
}

impl LocaleResolver {
    pub fn new(store: Arc<dyn PreferenceStore>, geo: GeoLocator) -> Self {
        Self { store, geo }
    }

    /// The persisted locale, if the slot holds a valid tag.
    ///
    /// Read failures and unknown tags are both reported as `None`.
    pub fn stored_locale(&self) -> Option<Locale> {
        let stored = match self.store.get(STORAGE_KEY) {
            Ok(stored) => stored?,
            Err(e) => {
                warn!("Failed to read stored locale: {}", e);
                return None;
            }
        };

        match Locale::from_code(&stored) {
            Ok(locale) => Some(locale),
            Err(_) => {
                debug!("Ignoring invalid stored locale '{}'", stored);
                None
            }
        }
    }

    /// Decide which locale to present, persisting the decision.
    ///
    /// Never fails: lookup errors degrade to the default locale.
    pub async fn resolve_initial_locale(&self) -> Locale {
        if let Some(locale) = self.stored_locale() {
            debug!("Using stored locale {}", locale);
            return locale;
        }

        let country = self.geo.country_code().await;
        let locale = Locale::for_country(country.as_deref());
        info!(
            "Detected locale {} (country: {})",
            locale,
            country.as_deref().unwrap_or("unknown")
        );

        self.persist(locale);
        locale
    }

    /// Overwrite the stored preference. No network call.
    pub fn set_locale(&self, locale: Locale) {
        self.persist(locale);
    }

    fn persist(&self, locale: Locale) {
        if let Err(e) = self.store.set(STORAGE_KEY, locale.code()) {
            warn!("Failed to persist locale {}: {}", locale, e);
        }
    }
}
