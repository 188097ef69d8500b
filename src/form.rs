//! Client side of the contact form.
//!
//! Tracks the `Idle -> Submitting -> {Success, Failed}` lifecycle of one form
//! instance and posts to the contact endpoint. A second submit while one is in
//! flight is refused; `Failed` may be retried. Submissions with empty required
//! fields are refused before anything is sent, and an abandoned submit puts the
//! form back to `Idle`.

use crate::contact::ContactSubmission;
use crate::i18n::ContactStrings;
use std::sync::Mutex;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Success,
    /// Carries the localized error shown under the form
    Failed(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("A submission is already in progress")]
    AlreadySubmitting,

    #[error("This form has already been sent")]
    AlreadySubmitted,

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

pub struct ContactForm {
    client: reqwest::Client,
    endpoint: String,
    strings: &'static ContactStrings,
    state: Mutex<FormState>,
}

impl ContactForm {
    /// `endpoint` is the full URL of the contact route,
    /// e.g. `https://midastouch.it/api/contact`.
    pub fn new(endpoint: &str, strings: &'static ContactStrings) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
            strings,
            state: Mutex::new(FormState::Idle),
        }
    }

    pub fn state(&self) -> FormState {
        self.lock().clone()
    }

    /// Label for the submit button in the current state.
    pub fn submit_label(&self) -> &'static str {
        match *self.lock() {
            FormState::Submitting => self.strings.sending,
            _ => self.strings.submit,
        }
    }

    pub fn is_submitting(&self) -> bool {
        *self.lock() == FormState::Submitting
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FormState> {
        // State is a plain enum, a poisoned guard still holds a valid value
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin(&self) -> Result<InFlight<'_>, FormError> {
        let mut state = self.lock();
        match *state {
            FormState::Submitting => Err(FormError::AlreadySubmitting),
            FormState::Success => Err(FormError::AlreadySubmitted),
            FormState::Idle | FormState::Failed(_) => {
                *state = FormState::Submitting;
                Ok(InFlight {
                    form: self,
                    settled: false,
                })
            }
        }
    }

    /// Post the form and return the state it settled in.
    pub async fn submit(&self, submission: &ContactSubmission) -> Result<FormState, FormError> {
        let missing = submission.missing_fields();
        if !missing.is_empty() {
            return Err(FormError::MissingFields(missing));
        }

        let in_flight = self.begin()?;

        let outcome = self
            .client
            .post(&self.endpoint)
            .json(submission)
            .send()
            .await;

        let next = match outcome {
            Ok(response) if response.status().is_success() => FormState::Success,
            Ok(response) => {
                warn!("Contact endpoint returned {}", response.status());
                FormState::Failed(self.strings.error.to_string())
            }
            Err(e) => {
                warn!("Contact endpoint unreachable: {}", e);
                FormState::Failed(self.strings.error.to_string())
            }
        };

        Ok(in_flight.settle(next))
    }
}

/// Claim on the `Submitting` state. Dropped without `settle` (the submit
/// future was cancelled), it puts the form back to `Idle`.
struct InFlight<'a> {
    form: &'a ContactForm,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self, next: FormState) -> FormState {
        self.settled = true;
        *self.form.lock() = next.clone();
        next
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            *self.form.lock() = FormState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Anna".to_string(),
            email: "anna@example.com".to_string(),
            message: "Ciao".to_string(),
            ..Default::default()
        }
    }

    fn form(server: &MockServer, locale: Locale) -> ContactForm {
        ContactForm::new(
            &format!("{}/api/contact", server.uri()),
            ContactStrings::for_locale(locale),
        )
    }

    #[tokio::test]
    async fn test_success_is_terminal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/contact"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let form = form(&server, Locale::English);
        assert_eq!(form.state(), FormState::Idle);

        assert_eq!(form.submit(&submission()).await, Ok(FormState::Success));
        assert_eq!(form.submit(&submission()).await, Err(FormError::AlreadySubmitted));
    }

    #[tokio::test]
    async fn test_failure_shows_localized_error_and_allows_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"error": "Failed to send email"})),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let form = form(&server, Locale::Italian);

        let first = form.submit(&submission()).await.unwrap();
        assert_eq!(
            first,
            FormState::Failed("Si è verificato un errore. Riprova più tardi.".to_string())
        );

        let retry = form.submit(&submission()).await.unwrap();
        assert_eq!(retry, FormState::Success);
    }

    #[tokio::test]
    async fn test_missing_fields_are_refused_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400))
            .expect(0)
            .mount(&server)
            .await;

        let form = form(&server, Locale::English);
        assert_eq!(
            form.submit(&ContactSubmission::default()).await,
            Err(FormError::MissingFields(vec!["name", "email", "message"]))
        );

        let mut partial = submission();
        partial.email = String::new();
        assert_eq!(
            form.submit(&partial).await,
            Err(FormError::MissingFields(vec!["email"]))
        );

        assert_eq!(form.state(), FormState::Idle);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_fields_are_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let form = form(&server, Locale::English);
        let mut spaced = submission();
        spaced.name = " ".to_string();

        assert_eq!(form.submit(&spaced).await, Ok(FormState::Success));
    }

    #[tokio::test]
    async fn test_cancelled_submit_returns_to_idle() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let form = form(&server, Locale::English);

        let cancelled =
            tokio::time::timeout(Duration::from_millis(50), form.submit(&submission())).await;
        assert!(cancelled.is_err());
        assert_eq!(form.state(), FormState::Idle);
        assert_eq!(form.submit_label(), "Send Message");

        assert_eq!(form.submit(&submission()).await, Ok(FormState::Success));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_failure() {
        let form = ContactForm::new(
            "http://127.0.0.1:9/api/contact",
            ContactStrings::for_locale(Locale::English),
        );

        let state = form.submit(&submission()).await.unwrap();
        assert_eq!(
            state,
            FormState::Failed("An error occurred. Please try again later.".to_string())
        );
    }

    #[tokio::test]
    async fn test_concurrent_submit_is_refused() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
            .expect(1)
            .mount(&server)
            .await;

        let form = Arc::new(form(&server, Locale::English));

        let in_flight = {
            let form = form.clone();
            tokio::spawn(async move { form.submit(&submission()).await })
        };

        // Wait until the first submission has claimed the form
        while !form.is_submitting() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(form.submit_label(), "Sending...");
        assert_eq!(form.submit(&submission()).await, Err(FormError::AlreadySubmitting));

        assert_eq!(in_flight.await.unwrap(), Ok(FormState::Success));
        assert_eq!(form.submit_label(), "Send Message");
    }
}
