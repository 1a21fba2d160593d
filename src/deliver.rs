use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, warn};
use thiserror::Error;

use crate::body;
use crate::config::{Config, ConfigError};
use crate::message::EmailMessage;

/// The API accepted the message (status <= 299).
#[derive(Debug, Clone)]
pub struct DeliveryResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// One delivery call's failure modes. Configuration problems are fatal
/// preconditions surfaced before any network I/O; transport and API failures
/// are returned for the caller to handle; this layer never retries.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP exchange could not be completed (DNS, connect, TLS).
    #[error("Mailgun request failed: {0}")]
    Transport(String),

    /// Mailgun answered with a non-success status. Carries the response body
    /// and the form body that was sent, so the caller can see which fields
    /// went out.
    #[error("Mailgun returned {status}: {response}")]
    Api { status: u16, response: String, request: String },
}

/// Send one message via the Mailgun Messages API
/// (https://documentation.mailgun.com/docs/mailgun/api-reference/openapi-final/tag/Messages/).
///
/// Exactly one synchronous POST per call. Blocks until the full response
/// body is received or the transport gives up.
pub fn deliver(email: &EmailMessage, config: &Config) -> Result<DeliveryResponse, DeliveryError> {
    let form_body = body::encode(&body::filter(body::transform(email)));
    let config = config.resolve()?;

    let url = format!("{}/{}/messages", config.base_url, config.domain);
    let auth = format!("Basic {}", STANDARD.encode(format!("api:{}", config.api_key)));

    debug!("POST {} ({} bytes)", url, form_body.len());

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| DeliveryError::Transport(e.to_string()))?;

    let resp = client
        .post(&url)
        .header("Authorization", &auth)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(form_body.clone())
        .send()
        .map_err(|e| {
            warn!("Mailgun request failed: {}", e);
            DeliveryError::Transport(e.to_string())
        })?;

    let status = resp.status().as_u16();
    let headers = resp
        .headers()
        .iter()
        .map(|(name, value)| {
            (name.as_str().to_string(), String::from_utf8_lossy(value.as_bytes()).into_owned())
        })
        .collect();
    let text = resp.text().map_err(|e| DeliveryError::Transport(e.to_string()))?;

    if status <= 299 {
        Ok(DeliveryResponse { status, headers, body: text })
    } else {
        warn!("Mailgun returned {}: {}", status, text);
        Err(DeliveryError::Api { status, response: text, request: form_body })
    }
}
