//! Question bank HTTP client.
//!
//! Thin blocking client over the create-question endpoint. One request per
//! call; no retries.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::error::{QbError, Result};

use super::import::QuestionSink;
use super::record::NewQuestion;

/// Default path of the create-question endpoint, relative to the base URL.
pub const DEFAULT_CREATE_PATH: &str = "/api/questions";

/// Identifier returned by a successful create call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedQuestion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Blocking client for the question bank API.
pub struct QuestionBankClient {
    base_url: String,
    create_path: String,
    token: Option<String>,
    http_client: reqwest::blocking::Client,
}

impl std::fmt::Debug for QuestionBankClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestionBankClient")
            .field("base_url", &self.base_url)
            .field("create_path", &self.create_path)
            .field("has_token", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl QuestionBankClient {
    /// Create a client for `base_url` with the given request timeout.
    pub fn new(base_url: &str, token: Option<&str>, timeout_secs: u64) -> Result<Self> {
        if base_url.trim().is_empty() {
            return Err(QbError::MissingConfig("api.base_url".to_string()));
        }
        if base_url.starts_with("http://") && token.is_some() {
            warn!("Question bank endpoint uses unencrypted HTTP. The API token will be sent in plain text.");
        }

        let http_client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .build()
            .map_err(|e| QbError::Config(format!("HTTP client error: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            create_path: DEFAULT_CREATE_PATH.to_string(),
            token: token
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from),
            http_client,
        })
    }

    /// Create a client from the `[api]` config section.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Ok(Self::new(&config.base_url, config.token.as_deref(), config.timeout_secs)?
            .with_create_path(&config.create_path))
    }

    /// Override the create-question path.
    #[must_use]
    pub fn with_create_path(mut self, path: &str) -> Self {
        let path = path.trim();
        if !path.is_empty() {
            self.create_path = if path.starts_with('/') {
                path.to_string()
            } else {
                format!("/{path}")
            };
        }
        self
    }

    /// Full URL of the create-question endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, self.create_path)
    }

    /// Submit one question. Any non-success outcome is an error.
    pub fn create_question(&self, record: &NewQuestion) -> Result<CreatedQuestion> {
        let url = self.endpoint();
        let request_id = new_request_id();
        debug!(request_id = %request_id, url = %url, name = %record.name, "Creating question");

        let mut request = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("X-Request-ID", &request_id)
            .json(record);
        if let Some(token) = self.token.as_ref() {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        debug!(request_id = %request_id, status, "Create question response");
        interpret_response(status, &body)
    }
}

impl QuestionSink for QuestionBankClient {
    fn create_question(&mut self, record: &NewQuestion) -> Result<CreatedQuestion> {
        Self::create_question(self, record)
    }
}

fn new_request_id() -> String {
    format!(
        "qbank-{}",
        Uuid::new_v4().to_string().split('-').next().unwrap_or("0")
    )
}

/// Map an HTTP status and body to the create outcome.
///
/// Success requires a 2xx status, a JSON body, and no `error` field.
pub fn interpret_response(status: u16, body: &str) -> Result<CreatedQuestion> {
    let parsed = serde_json::from_str::<Value>(body);

    if !(200..300).contains(&status) {
        let message = parsed
            .ok()
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| format!("HTTP {status}"));
        return Err(QbError::Api {
            status: Some(status),
            message,
        });
    }

    let value = parsed.map_err(|e| QbError::Api {
        status: Some(status),
        message: format!("unparsable response body: {e}"),
    })?;

    if let Some(message) = value.get("error").filter(|v| !v.is_null()).map(|v| {
        error_message(&value).unwrap_or_else(|| v.to_string())
    }) {
        return Err(QbError::Api {
            status: Some(status),
            message,
        });
    }

    let id = value.get("id").and_then(|id| match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });
    Ok(CreatedQuestion { id })
}

fn error_message(value: &Value) -> Option<String> {
    match value.get("error") {
        Some(Value::String(message)) => Some(message.clone()),
        Some(Value::Object(obj)) => obj
            .get("message")
            .and_then(Value::as_str)
            .map(String::from),
        _ => value
            .get("message")
            .and_then(Value::as_str)
            .map(String::from),
    }
}
