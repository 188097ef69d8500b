use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Brevo (transactional email)
    pub brevo_api_key: Option<String>,
    pub brevo_api_url: String,
    pub contact_to_email: String,

    // Site
    pub site_base_url: String,
    pub port: u16,

    // Locale detection
    pub geo_timeout_secs: u64,
    pub locale_store_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Brevo - a missing key is reported per request, not at startup
            brevo_api_key: std::env::var("BREVO_API_KEY")
                .ok()
                .filter(|v| !v.is_empty()),
            brevo_api_url: std::env::var("BREVO_API_URL")
                .unwrap_or_else(|_| "https://api.brevo.com/v3/smtp/email".to_string()),
            contact_to_email: std::env::var("CONTACT_TO_EMAIL")
                .unwrap_or_else(|_| "info@midastouch.it".to_string()),

            // Site
            site_base_url: std::env::var("SITE_BASE_URL")
                .unwrap_or_else(|_| "https://midastouch.it".to_string()),
            port: match std::env::var("PORT") {
                Ok(v) => v.parse().context("PORT must be a valid port number")?,
                Err(_) => 8080,
            },

            // Locale detection
            geo_timeout_secs: std::env::var("GEO_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            locale_store_path: std::env::var("LOCALE_STORE_PATH")
                .unwrap_or_else(|_| ".midas-touch-locale.json".to_string()),
        })
    }
}
