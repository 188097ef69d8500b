//! Best-effort country lookup from the visitor's IP address.
//!
//! Providers are tried in order with a shared per-attempt timeout; the first
//! one that yields a country code wins. Every failure kind (transport error,
//! timeout, non-2xx status, malformed body, missing or empty field) moves on
//! to the next provider, and exhausting the chain yields `None`.

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("{provider}: timed out after {timeout:?}")]
    Timeout {
        provider: String,
        timeout: Duration,
    },

    #[error("{provider}: request failed: {source}")]
    Request {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider}: unexpected status {status}")]
    Status { provider: String, status: u16 },

    #[error("{provider}: response has no '{field}' value")]
    MissingField { provider: String, field: String },
}

/// One geolocation service and the JSON field holding its country code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoProvider {
    pub name: String,
    pub url: String,
    pub country_field: String,
}

impl GeoProvider {
    pub fn new(name: &str, url: &str, country_field: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            country_field: country_field.to_string(),
        }
    }

    /// ipapi.co, answers `{"country_code": "IT", ...}`
    pub fn ipapi() -> Self {
        Self::new("ipapi.co", "https://ipapi.co/json/", "country_code")
    }

    /// ip-api.com, answers `{"countryCode": "IT"}`
    pub fn ip_api() -> Self {
        Self::new(
            "ip-api.com",
            "https://ip-api.com/json/?fields=countryCode",
            "countryCode",
        )
    }

    /// Pull the country code out of a provider response body.
    ///
    /// The code is upper-cased; empty or non-string values count as missing.
    pub fn extract_country(&self, body: &Value) -> Option<String> {
        body.get(&self.country_field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_ascii_uppercase)
    }

    async fn fetch(&self, client: &reqwest::Client) -> Result<String, GeoError> {
        let request_error = |source: reqwest::Error| GeoError::Request {
            provider: self.name.clone(),
            source,
        };

        let response = client
            .get(&self.url)
            .send()
            .await
            .map_err(request_error)?;

        if !response.status().is_success() {
            return Err(GeoError::Status {
                provider: self.name.clone(),
                status: response.status().as_u16(),
            });
        }

        let body: Value = response.json().await.map_err(request_error)?;

        self.extract_country(&body)
            .ok_or_else(|| GeoError::MissingField {
                provider: self.name.clone(),
                field: self.country_field.clone(),
            })
    }

    /// Look up the country code, bounded by `timeout`.
    pub async fn lookup(
        &self,
        client: &reqwest::Client,
        timeout: Duration,
    ) -> Result<String, GeoError> {
        match tokio::time::timeout(timeout, self.fetch(client)).await {
            Ok(result) => result,
            Err(_) => Err(GeoError::Timeout {
                provider: self.name.clone(),
                timeout,
            }),
        }
    }
}

/// Ordered chain of geolocation providers.
#[derive(Debug, Clone)]
pub struct GeoLocator {
    client: reqwest::Client,
    providers: Vec<GeoProvider>,
    timeout: Duration,
}

impl GeoLocator {
    pub fn new(providers: Vec<GeoProvider>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            providers,
            timeout,
        }
    }

    /// ipapi.co first, ip-api.com as fallback.
    pub fn with_default_providers(timeout: Duration) -> Self {
        Self::new(vec![GeoProvider::ipapi(), GeoProvider::ip_api()], timeout)
    }

    pub fn providers(&self) -> &[GeoProvider] {
        &self.providers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Detect the visitor's country code. Never fails; `None` means unknown.
    pub async fn country_code(&self) -> Option<String> {
        for provider in &self.providers {
            match provider.lookup(&self.client, self.timeout).await {
                Ok(code) => {
                    debug!("Detected country {} via {}", code, provider.name);
                    return Some(code);
                }
                Err(e) => warn!("Geolocation lookup failed, trying next provider: {}", e),
            }
        }

        debug!("All geolocation providers failed, country unknown");
        None
    }
}

impl Default for GeoLocator {
    fn default() -> Self {
        Self::with_default_providers(DEFAULT_TIMEOUT)
    }
}
