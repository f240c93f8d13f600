use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use nt_core::{LlmConfig, NewsStrategy, RawRecord, RecordTraits, StrategyError, Taxonomy};
use nt_inference::{ChatMessage, LanguageModel, MessagesRequest, Tool};

use crate::extract::extract_json_array;

/// Asks a web-search-enabled model for a fixed number of curated items.
///
/// The model is not guaranteed to follow the requested schema, so the
/// records it returns are handed to the normalizer as untrusted input.
#[derive(Debug)]
pub struct LlmStrategy {
    model: Arc<dyn LanguageModel>,
    config: LlmConfig,
    system_prompt: String,
}

impl LlmStrategy {
    pub fn new(model: Arc<dyn LanguageModel>, config: LlmConfig, taxonomy: &Taxonomy) -> Self {
        let system_prompt = system_prompt(config.item_count, taxonomy);
        Self {
            model,
            config,
            system_prompt,
        }
    }

    pub fn request_for(&self, query: Option<&str>) -> MessagesRequest {
        let topic = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(self.config.default_topic.as_str());
        MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            tools: vec![Tool::web_search()],
            system: self.system_prompt.clone(),
            messages: vec![ChatMessage::user(format!(
                "Find the {} most important news stories from the past week about: {}",
                self.config.item_count, topic
            ))],
        }
    }
}

pub fn system_prompt(item_count: usize, taxonomy: &Taxonomy) -> String {
    format!(
        "You are a news curator tracking agentic AI. Use web search to find recent, real news. \
Respond with ONLY a JSON array of exactly {count} objects and nothing else: no prose, no markdown. \
Each object must have these fields: \
\"title\" (string), \
\"summary\" (string, one or two sentences), \
\"category\" (one of: {categories}), \
\"sentiment\" (one of: bullish, neutral, critical), \
\"impactScore\" (number from 1 to 10), \
\"source\" (publisher name), \
\"date\" (YYYY-MM-DD), \
\"url\" (link to the article), \
\"tags\" (array of two or three short strings), \
\"featured\" (true for the single most important story, false otherwise).",
        count = item_count,
        categories = taxonomy.categories().join(", "),
    )
}

#[async_trait]
impl NewsStrategy for LlmStrategy {
    fn name(&self) -> &str {
        "llm"
    }

    fn record_traits(&self) -> RecordTraits {
        RecordTraits {
            supplies_category: true,
            supplies_impact: true,
            feature_first: false,
        }
    }

    async fn fetch(&self, query: Option<&str>) -> Result<Vec<RawRecord>, StrategyError> {
        let request = self.request_for(query);
        let response = self.model.complete(&request).await?;
        let text = response.text();
        debug!("🧠 {} answered with {} characters", self.model.name(), text.len());
        let records = extract_json_array(&text)?;
        info!("🧠 Extracted {} records from model output", records.len());
        Ok(records)
    }
}
