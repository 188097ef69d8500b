use crate::config::Config;
use crate::contact::{ContactError, ContactSubmission, ContactSubmitter};
use crate::sitemap;
use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub submitter: Arc<ContactSubmitter>,
    pub site_base_url: String,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            submitter: Arc::new(ContactSubmitter::from_config(config)),
            site_base_url: config.site_base_url.clone(),
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/contact", post(contact_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn contact_handler(
    State(state): State<AppState>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ContactError> {
    // Unreadable bodies are a server-side failure from the form's point of view
    let Json(submission) = payload.map_err(|e| {
        error!("Contact form error: {}", e);
        ContactError::Internal(e.body_text())
    })?;

    if let Err(e) = state.submitter.submit(&submission).await {
        // Configuration and delivery failures are logged by the submitter
        match &e {
            ContactError::MissingFields(_) => warn!("Rejected contact form: {}", e),
            ContactError::Internal(_) => error!("{}", e),
            _ => {}
        }
        return Err(e);
    }

    Ok(Json(json!({ "success": true })))
}

async fn sitemap_handler(State(state): State<AppState>) -> impl IntoResponse {
    let entries = sitemap::landing_entries(&state.site_base_url, Utc::now());
    (
        [(header::CONTENT_TYPE, "application/xml")],
        sitemap::render_xml(&entries),
    )
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: &Config) -> Result<()> {
    if config.brevo_api_key.is_none() {
        warn!("BREVO_API_KEY not set, contact submissions will fail");
    }

    let app = build_router(AppState::from_config(config));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_fields_response() {
        let response = ContactError::MissingFields(vec!["name"]).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Missing required fields"})
        );
    }

    #[tokio::test]
    async fn test_configuration_error_response() {
        let response = ContactError::Configuration.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Server configuration error"})
        );
    }

    #[tokio::test]
    async fn test_delivery_failure_hides_provider_body() {
        let response = ContactError::DeliveryFailed {
            status: 401,
            body: "{\"message\":\"Key not found\"}".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({"error": "Failed to send email"}));
    }

    #[tokio::test]
    async fn test_internal_error_response() {
        let response = ContactError::Internal("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({"error": "Internal server error"}));
    }

    #[test]
    fn test_state_from_config() {
        let config = Config {
            brevo_api_key: None,
            brevo_api_url: "http://localhost/email".to_string(),
            contact_to_email: "info@midastouch.it".to_string(),
            site_base_url: "https://example.test".to_string(),
            port: 0,
            geo_timeout_secs: 3,
            locale_store_path: "unused.json".to_string(),
        };

        let state = AppState::from_config(&config);
        assert_eq!(state.site_base_url, "https://example.test");
    }
}
