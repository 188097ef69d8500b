//! Locale type: the closed set of display languages the site supports.

use crate::i18n::{LocaleConfig, LocaleRegistry};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A display language of the site.
///
/// `English` is the default locale served to everyone outside the primary
/// market; `Italian` is served to visitors detected in Italy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "it")]
    Italian,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::English, Locale::Italian];

    /// Create a Locale from a stored tag.
    ///
    /// # Returns
    /// * `Ok(Locale)` for "en" or "it"
    /// * `Err` for anything else
    pub fn from_code(code: &str) -> Result<Locale> {
        match LocaleRegistry::get().get_by_code(code) {
            Some(config) => Ok(config.locale),
            None => bail!("Unknown locale tag: '{}'", code),
        }
    }

    /// The fallback locale.
    pub fn default_locale() -> Locale {
        LocaleRegistry::get().default_config().locale
    }

    /// Locale to serve a visitor from the given country (if known).
    pub fn for_country(country_code: Option<&str>) -> Locale {
        LocaleRegistry::get().locale_for_country(country_code)
    }

    /// Get the tag persisted for this locale (e.g., "en", "it").
    pub fn code(&self) -> &'static str {
        self.config().code
    }

    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get().config_for(*self)
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn is_default(&self) -> bool {
        self.config().is_default
    }

    /// The other locale, as used by the header's language switch.
    pub fn toggled(&self) -> Locale {
        match self {
            Locale::English => Locale::Italian,
            Locale::Italian => Locale::English,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Locale::from_code(s)
    }
}
