//! HTTP utilities for the Test record API

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Client-side request errors
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-success status; `message` is the server's `error` field if any
    #[error("API request failed: {status} {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse response JSON: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status: 404, .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}

#[derive(Deserialize)]
struct ErrorPayload {
    error: String,
}

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.chars().count() > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for JSON API calls
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with a per-request timeout
    pub fn new(timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(concat!("tadmin/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Send a request and decode a JSON success body
    pub async fn send<B, T>(&self, method: Method, url: &str, body: Option<&B>) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&text));
            return Err(status_error(status, &text));
        }

        serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

fn status_error(status: StatusCode, body: &str) -> ClientError {
    let message = serde_json::from_str::<ErrorPayload>(body)
        .map(|p| p.error)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("").to_string());

    ClientError::Status {
        status: status.as_u16(),
        message,
    }
}

/// Format an API error for display.
///
/// Server-supplied messages are surfaced for client errors (4xx) since the
/// server already keeps them short; everything else maps to a fixed hint.
pub fn format_api_error(error: &ClientError) -> String {
    match error {
        ClientError::Status { status, message } if (400..500).contains(status) => {
            if message.is_empty() {
                format!("Request rejected ({})", status)
            } else {
                truncate(message, 80)
            }
        }
        ClientError::Status { .. } => "Server error. Please try again.".to_string(),
        ClientError::Transport(_) => {
            "Request failed. Check your network connection and try again.".to_string()
        }
        ClientError::Decode(_) => "Unexpected response from server.".to_string(),
        ClientError::InvalidUrl(url) => format!("Invalid server URL: {}", truncate(url, 60)),
    }
}

fn truncate(s: &str, max: usize) -> String {
    let sanitized: String = s
        .chars()
        .filter(|c| !c.is_control())
        .take(max)
        .collect();
    if sanitized.chars().count() < s.chars().count() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}
