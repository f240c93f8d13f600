use async_trait::async_trait;
use serde_json::Value;

use crate::error::StrategyError;

/// Untrusted record as produced by a strategy, before normalization.
pub type RawRecord = Value;

/// What a strategy's records already carry, so the manager knows which
/// enrichment steps to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordTraits {
    pub supplies_category: bool,
    pub supplies_impact: bool,
    /// Mark the first article featured when none is.
    pub feature_first: bool,
}

#[async_trait]
pub trait NewsStrategy: Send + Sync {
    /// Stable short name, also the prefix of generated article ids.
    fn name(&self) -> &str;

    fn record_traits(&self) -> RecordTraits;

    /// Whether a run should be cut off by the manager's timeout. Strategies
    /// that never touch the network opt out.
    fn needs_deadline(&self) -> bool {
        true
    }

    /// One attempt, no internal retries.
    async fn fetch(&self, query: Option<&str>) -> Result<Vec<RawRecord>, StrategyError>;
}
