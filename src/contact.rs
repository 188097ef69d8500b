use crate::config::Config;
use crate::escape::escape_html;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::{error, info};

const SENDER_NAME: &str = "Midas Touch Website";
const SENDER_EMAIL: &str = "noreply@midastouch.it";
const RECIPIENT_NAME: &str = "Midas Touch";

/// A contact form submission as posted by the landing page.
///
/// Required fields that are absent or `null` in the JSON body deserialize to
/// empty strings so they are reported as missing rather than as a malformed
/// request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("BREVO_API_KEY not configured")]
    Configuration,

    #[error("Brevo API error ({status}): {body}")]
    DeliveryFailed { status: u16, body: String },

    #[error("Contact form error: {0}")]
    Internal(String),
}

impl ContactError {
    /// Message safe to return to the browser.
    pub fn public_message(&self) -> &'static str {
        match self {
            ContactError::MissingFields(_) => "Missing required fields",
            ContactError::Configuration => "Server configuration error",
            ContactError::DeliveryFailed { .. } => "Failed to send email",
            ContactError::Internal(_) => "Internal server error",
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, ContactError::MissingFields(_))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl ContactSubmission {
    /// Required fields that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn validate(&self) -> Result<(), ContactError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ContactError::MissingFields(missing))
        }
    }

    pub fn company(&self) -> Option<&str> {
        present(&self.company)
    }

    pub fn project_type(&self) -> Option<&str> {
        present(&self.project_type)
    }

    pub fn budget(&self) -> Option<&str> {
        present(&self.budget)
    }

    pub fn subject(&self) -> String {
        match self.company() {
            Some(company) => {
                format!("[Midas Touch] Nuovo contatto da {} - {}", self.name, company)
            }
            None => format!("[Midas Touch] Nuovo contatto da {}", self.name),
        }
    }

    /// Render the notification body as an HTML table.
    ///
    /// Optional fields that were not filled in get no row at all.
    pub fn render_html(&self) -> String {
        let name = escape_html(&self.name);
        let email = escape_html(&self.email);

        let mut rows = vec![
            table_row("Nome", &name),
            table_row("Email", &format!("<a href=\"mailto:{0}\">{0}</a>", email)),
        ];

        let optional = [
            ("Azienda", self.company()),
            ("Tipo Progetto", self.project_type()),
            ("Budget", self.budget()),
        ];
        for (label, value) in optional {
            if let Some(value) = value {
                rows.push(table_row(label, &escape_html(value)));
            }
        }

        rows.push(format!(
            concat!(
                "  <tr>\n",
                "    <td style=\"{}\">Messaggio</td>\n",
                "    <td style=\"padding: 10px; white-space: pre-wrap;\">{}</td>\n",
                "  </tr>"
            ),
            "padding: 10px; font-weight: bold; vertical-align: top;",
            escape_html(&self.message)
        ));

        format!(
            "<h2>Nuova richiesta dal sito Midas Touch</h2>\n\n\
             <table style=\"border-collapse: collapse; width: 100%; max-width: 600px;\">\n\
             {}\n\
             </table>\n",
            rows.join("\n")
        )
    }
}

const LABEL_STYLE: &str =
    "padding: 10px; border-bottom: 1px solid #eee; font-weight: bold; width: 150px;";
const VALUE_STYLE: &str = "padding: 10px; border-bottom: 1px solid #eee;";

fn table_row(label: &str, value: &str) -> String {
    format!(
        "  <tr>\n    <td style=\"{}\">{}</td>\n    <td style=\"{}\">{}</td>\n  </tr>",
        LABEL_STYLE, label, VALUE_STYLE, value
    )
}

// ==================== Brevo Payload ====================

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailAddress {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub sender: EmailAddress,
    pub to: Vec<EmailAddress>,
    pub reply_to: EmailAddress,
    pub subject: String,
    pub html_content: String,
}

/// Relays contact submissions to the studio inbox through Brevo.
#[derive(Debug, Clone)]
pub struct ContactSubmitter {
    client: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
    to_email: String,
}

impl ContactSubmitter {
    pub fn new(api_key: Option<String>, api_url: &str, to_email: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url: api_url.to_string(),
            to_email: to_email.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.brevo_api_key.clone(),
            &config.brevo_api_url,
            &config.contact_to_email,
        )
    }

    pub fn build_request(&self, submission: &ContactSubmission) -> SendEmailRequest {
        SendEmailRequest {
            sender: EmailAddress {
                email: SENDER_EMAIL.to_string(),
                name: SENDER_NAME.to_string(),
            },
            to: vec![EmailAddress {
                email: self.to_email.clone(),
                name: RECIPIENT_NAME.to_string(),
            }],
            reply_to: EmailAddress {
                email: submission.email.clone(),
                name: submission.name.clone(),
            },
            subject: submission.subject(),
            html_content: submission.render_html(),
        }
    }

    /// Validate and send a submission. Exactly one request on success paths,
    /// none when validation or configuration fails. Never retries.
    pub async fn submit(&self, submission: &ContactSubmission) -> Result<(), ContactError> {
        submission.validate()?;

        let Some(api_key) = self.api_key.as_deref() else {
            error!("BREVO_API_KEY not configured");
            return Err(ContactError::Configuration);
        };

        let request = self.build_request(submission);

        let response = self
            .client
            .post(&self.api_url)
            .header("accept", "application/json")
            .header("api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                ContactError::Internal(format!("Failed to send request to Brevo API: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!("Brevo API error ({}): {}", status, body);
            return Err(ContactError::DeliveryFailed { status, body });
        }

        info!("Contact request from {} relayed", request.reply_to.email);
        Ok(())
    }
}
