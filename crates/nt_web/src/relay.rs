//! Stateless pass-through to the LLM messages endpoint. The browser talks to
//! this relay so the provider key never leaves the server.

use std::fmt;
use std::time::Duration;

use axum::http::StatusCode;
use reqwest::Client;
use tracing::{debug, warn};

use nt_core::config::{DEFAULT_API_VERSION, DEFAULT_MESSAGES_URL};
use nt_core::{Error, Result};

pub struct Relay {
    client: Client,
    upstream_url: String,
    api_key: Option<String>,
    api_version: String,
}

impl fmt::Debug for Relay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relay")
            .field("upstream_url", &self.upstream_url)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl Relay {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            upstream_url: DEFAULT_MESSAGES_URL.to_string(),
            api_key,
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    pub fn with_upstream(mut self, url: impl Into<String>) -> Self {
        self.upstream_url = url.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Sends `body` upstream verbatim and hands back status and body unchanged.
    pub async fn forward(&self, body: Vec<u8>) -> Result<(StatusCode, Vec<u8>)> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Config("relay has no upstream API key".to_string()))?;

        debug!("Relaying {} bytes to {}", body.len(), self.upstream_url);
        let response = self
            .client
            .post(&self.upstream_url)
            .header("content-type", "application/json")
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.api_version)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!("Relay upstream unreachable: {}", e);
                Error::Relay(e.to_string())
            })?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .map_err(|e| Error::Relay(e.to_string()))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Relay(e.to_string()))?;
        Ok((status, bytes.to_vec()))
    }
}
