use std::time::Duration;

use async_trait::async_trait;

use nt_core::{Article, NewsStrategy, RawRecord, RecordTraits, StrategyError};

/// Serves a fixed article set after an artificial delay. Never fails.
#[derive(Debug, Clone)]
pub struct StaticStrategy {
    articles: Vec<Article>,
    delay: Duration,
}

impl StaticStrategy {
    pub fn new(articles: Vec<Article>, delay: Duration) -> Self {
        Self { articles, delay }
    }
}

#[async_trait]
impl NewsStrategy for StaticStrategy {
    fn name(&self) -> &str {
        "static"
    }

    fn record_traits(&self) -> RecordTraits {
        RecordTraits {
            supplies_category: true,
            supplies_impact: true,
            feature_first: false,
        }
    }

    fn needs_deadline(&self) -> bool {
        false
    }

    async fn fetch(&self, _query: Option<&str>) -> Result<Vec<RawRecord>, StrategyError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.articles
            .iter()
            .map(|a| serde_json::to_value(a).map_err(|e| StrategyError::Parse(e.to_string())))
            .collect()
    }
}
