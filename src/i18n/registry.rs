//! Locale registry: Single source of truth for the site's supported locales.
//!
//! The site ships in exactly two locales. The registry holds their metadata and
//! the list of countries whose visitors are served each locale when no stored
//! preference exists.

use crate::i18n::Locale;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// The locale this entry describes
    pub locale: Locale,

    /// Tag persisted in the preference store (e.g., "en", "it")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Italian")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "Italiano")
    pub native_name: &'static str,

    /// Whether this is the fallback locale (exactly one should be true)
    pub is_default: bool,

    /// ISO 3166-1 alpha-2 codes of countries that get this locale on first visit
    pub countries: &'static [&'static str],
}

static LOCALES: [LocaleConfig; 2] = [
    LocaleConfig {
        locale: Locale::English,
        code: "en",
        name: "English",
        native_name: "English",
        is_default: true,
        countries: &[],
    },
    LocaleConfig {
        locale: Locale::Italian,
        code: "it",
        name: "Italian",
        native_name: "Italiano",
        is_default: false,
        countries: &["IT"],
    },
];

static REGISTRY: LocaleRegistry = LocaleRegistry { locales: &LOCALES };

/// Global locale registry.
pub struct LocaleRegistry {
    locales: &'static [LocaleConfig],
}

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        &REGISTRY
    }

    /// Get a locale configuration by its tag.
    ///
    /// Matching is exact: the preference store only ever holds lowercase tags,
    /// and anything else is treated as unknown.
    pub fn get_by_code(&self, code: &str) -> Option<&'static LocaleConfig> {
        self.locales.iter().find(|config| config.code == code)
    }

    /// Get the configuration for a locale.
    pub fn config_for(&self, locale: Locale) -> &'static LocaleConfig {
        match locale {
            Locale::English => &self.locales[0],
            Locale::Italian => &self.locales[1],
        }
    }

    /// Get all locale configurations.
    pub fn list_all(&self) -> Vec<&'static LocaleConfig> {
        self.locales.iter().collect()
    }

    /// Get the default (fallback) locale configuration.
    pub fn default_config(&self) -> &'static LocaleConfig {
        self.locales
            .iter()
            .find(|config| config.is_default)
            .unwrap_or(&self.locales[0])
    }

    /// Map a detected country code to the locale its visitors should see.
    ///
    /// Unknown or unlisted countries get the default locale.
    pub fn locale_for_country(&self, country_code: Option<&str>) -> Locale {
        let Some(country_code) = country_code else {
            return self.default_config().locale;
        };

        self.locales
            .iter()
            .find(|config| {
                config
                    .countries
                    .iter()
                    .any(|c| c.eq_ignore_ascii_case(country_code))
            })
            .map(|config| config.locale)
            .unwrap_or(self.default_config().locale)
    }
}
