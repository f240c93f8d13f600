use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info, instrument};
use url::Url;

use nt_core::{Error, NewsStrategy, RawRecord, RecordTraits, Result, SearchConfig, StrategyError};

pub const DEFAULT_TAGS: [&str; 3] = ["AI", "Agents", "Automation"];

/// Keyword news search over a GNews-style endpoint.
pub struct SearchStrategy {
    client: Client,
    config: SearchConfig,
    api_key: String,
}

impl fmt::Debug for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchStrategy")
            .field("client", &"<reqwest::Client>")
            .field("config", &self.config)
            .finish()
    }
}

impl SearchStrategy {
    pub fn new(config: SearchConfig, timeout: Duration) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::Config("search strategy requires an API key".to_string()))?;
        Url::parse(&config.base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn request_url(&self, query: &str) -> std::result::Result<Url, StrategyError> {
        let max = self.config.max_results.to_string();
        Url::parse_with_params(
            &self.config.base_url,
            &[
                ("q", query),
                ("lang", self.config.language.as_str()),
                ("max", max.as_str()),
                ("apikey", self.api_key.as_str()),
            ],
        )
        .map_err(|e| StrategyError::Network(e.to_string()))
    }
}

#[async_trait]
impl NewsStrategy for SearchStrategy {
    fn name(&self) -> &str {
        "api"
    }

    fn record_traits(&self) -> RecordTraits {
        RecordTraits {
            supplies_category: false,
            supplies_impact: false,
            feature_first: true,
        }
    }

    #[instrument(skip(self), fields(strategy = "search"))]
    async fn fetch(&self, query: Option<&str>) -> std::result::Result<Vec<RawRecord>, StrategyError> {
        let query = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(self.config.query.as_str());
        let url = self.request_url(query)?;
        debug!("GET {} (q={})", self.config.base_url, query);

        let response = self
            .client
            .get(url)
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

        let body: Value = response
            .json()
            .await
            .map_err(|e| StrategyError::Parse(e.to_string()))?;

        let records: Vec<RawRecord> = match body.get("articles") {
            Some(Value::Array(items)) => items.iter().cloned().map(with_default_tags).collect(),
            _ => Vec::new(),
        };
        info!("🔎 Search returned {} articles", records.len());
        Ok(records)
    }
}

fn with_default_tags(mut record: RawRecord) -> RawRecord {
    if let Some(fields) = record.as_object_mut() {
        fields.entry("tags").or_insert_with(|| json!(DEFAULT_TAGS));
    }
    record
}
