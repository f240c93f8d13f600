use std::fmt;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use nt_core::config::DEFAULT_API_VERSION;
use nt_core::{LlmEndpoint, Result, StrategyError};

use super::{LanguageModel, MessagesRequest, MessagesResponse};

/// Messages-API client, either keyed or pointed at the relay.
pub struct AnthropicModel {
    client: Client,
    endpoint: LlmEndpoint,
    api_version: String,
}

impl fmt::Debug for AnthropicModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnthropicModel")
            .field("client", &"<reqwest::Client>")
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl AnthropicModel {
    pub fn new(endpoint: LlmEndpoint, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn endpoint(&self) -> &LlmEndpoint {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl LanguageModel for AnthropicModel {
    fn name(&self) -> &str {
        "Anthropic"
    }

    async fn complete(&self, request: &MessagesRequest) -> std::result::Result<MessagesResponse, StrategyError> {
        let mut builder = self.client.post(self.endpoint.url()).json(request);
        // the relay attaches credentials itself
        if let Some(key) = self.endpoint.api_key() {
            builder = builder
                .header("x-api-key", key)
                .header("anthropic-version", &self.api_version);
        }

        debug!("POST {} (model {})", self.endpoint.url(), request.model);
        let response = builder
            .send()
            .await
            .map_err(|e| StrategyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StrategyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| StrategyError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| StrategyError::Parse(e.to_string()))
    }
}
