//! Messages-API plumbing for LLM-backed news curation.

use std::sync::Arc;

use nt_core::{LlmConfig, PipelineConfig, Result};

pub mod models;

pub use models::{
    AnthropicModel, ChatMessage, ContentBlock, DummyModel, LanguageModel, MessagesRequest,
    MessagesResponse, Tool,
};

/// Builds the configured model, or `None` when no LLM endpoint is set.
pub fn create_model(config: &PipelineConfig) -> Result<Option<Arc<dyn LanguageModel>>> {
    let LlmConfig {
        endpoint,
        api_version,
        ..
    } = &config.llm;
    let Some(endpoint) = endpoint.clone() else {
        return Ok(None);
    };
    let model = AnthropicModel::new(endpoint, config.timeout)?.with_api_version(api_version.clone());
    tracing::info!("🧠 Language model configured ({:?})", model.endpoint());
    Ok(Some(Arc::new(model)))
}

pub mod prelude {
    pub use super::create_model;
    pub use super::models::{LanguageModel, MessagesRequest, MessagesResponse};
    pub use nt_core::{Error, Result, StrategyError};
}
