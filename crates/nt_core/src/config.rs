//! Pipeline configuration. Secrets only ever come from the environment or the
//! command line, never from source.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::taxonomy::TaxonomyKind;
use crate::{Error, Result};

pub const ENV_SEARCH_API_KEY: &str = "NT_GNEWS_API_KEY";
pub const ENV_LLM_API_KEY: &str = "ANTHROPIC_KEY";
pub const ENV_RELAY_URL: &str = "NT_RELAY_URL";

pub const DEFAULT_SEARCH_URL: &str = "https://gnews.io/api/v4/search";
pub const DEFAULT_SEARCH_QUERY: &str = r#""AI agent" OR "autonomous agent" OR "Agentic AI""#;
pub const DEFAULT_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_API_VERSION: &str = "2023-06-01";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

pub const DEFAULT_TRENDING_TOPICS: [&str; 5] = [
    "Multi-Agent Orchestration",
    "Edge AI Agents",
    "Autonomous Auditing",
    "Self-Healing Code",
    "Robotic Process Agents",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Pick the richest strategy the configured credentials allow.
    Auto,
    Static,
    Search,
    Llm,
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(StrategyKind::Auto),
            "static" | "mock" => Ok(StrategyKind::Static),
            "search" | "gnews" => Ok(StrategyKind::Search),
            "llm" | "claude" => Ok(StrategyKind::Llm),
            other => Err(format!("Unknown strategy: {}", other)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::Auto => "auto",
            StrategyKind::Static => "static",
            StrategyKind::Search => "search",
            StrategyKind::Llm => "llm",
        };
        f.write_str(name)
    }
}

#[derive(Clone)]
pub struct SearchConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub query: String,
    pub language: String,
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SEARCH_URL.to_string(),
            api_key: None,
            query: DEFAULT_SEARCH_QUERY.to_string(),
            language: "en".to_string(),
            max_results: 10,
        }
    }
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("query", &self.query)
            .field("language", &self.language)
            .field("max_results", &self.max_results)
            .finish()
    }
}

/// Where LLM requests go: straight to the provider, or through the relay
/// which holds the key server-side.
#[derive(Clone, PartialEq)]
pub enum LlmEndpoint {
    Direct { url: String, api_key: String },
    Relay { url: String },
}

impl LlmEndpoint {
    pub fn url(&self) -> &str {
        match self {
            LlmEndpoint::Direct { url, .. } | LlmEndpoint::Relay { url } => url,
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        match self {
            LlmEndpoint::Direct { api_key, .. } => Some(api_key),
            LlmEndpoint::Relay { .. } => None,
        }
    }
}

impl fmt::Debug for LlmEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmEndpoint::Direct { url, .. } => f
                .debug_struct("Direct")
                .field("url", url)
                .field("api_key", &"<redacted>")
                .finish(),
            LlmEndpoint::Relay { url } => f.debug_struct("Relay").field("url", url).finish(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub endpoint: Option<LlmEndpoint>,
    pub model: String,
    pub max_tokens: u32,
    /// Exact number of items the model is asked to return.
    pub item_count: usize,
    pub api_version: String,
    pub default_topic: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 4000,
            item_count: 8,
            api_version: DEFAULT_API_VERSION.to_string(),
            default_topic: "agentic AI".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub strategy: StrategyKind,
    pub taxonomy: TaxonomyKind,
    pub search: SearchConfig,
    pub llm: LlmConfig,
    /// Bounded wait around one strategy invocation.
    pub timeout: Duration,
    /// Artificial latency of the static strategy.
    pub static_delay: Duration,
    pub trending_topics: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Auto,
            taxonomy: TaxonomyKind::Industries,
            search: SearchConfig::default(),
            llm: LlmConfig::default(),
            timeout: Duration::from_secs(30),
            static_delay: Duration::from_millis(800),
            trending_topics: DEFAULT_TRENDING_TOPICS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl PipelineConfig {
    /// The strategy that will actually run given the credentials at hand.
    pub fn resolved_strategy(&self) -> StrategyKind {
        match self.strategy {
            StrategyKind::Auto => {
                if self.llm.endpoint.is_some() {
                    StrategyKind::Llm
                } else if self.search.api_key.is_some() {
                    StrategyKind::Search
                } else {
                    StrategyKind::Static
                }
            }
            StrategyKind::Search if self.search.api_key.is_none() => {
                tracing::warn!("search strategy requested without {}, using static data", ENV_SEARCH_API_KEY);
                StrategyKind::Static
            }
            StrategyKind::Llm if self.llm.endpoint.is_none() => {
                tracing::warn!(
                    "llm strategy requested without {} or {}, using static data",
                    ENV_LLM_API_KEY,
                    ENV_RELAY_URL
                );
                StrategyKind::Static
            }
            other => other,
        }
    }
}

/// A relay URL takes precedence over a direct key so the key can stay server-side.
pub fn llm_endpoint(relay_url: Option<&str>, api_key: Option<&str>) -> Result<Option<LlmEndpoint>> {
    if let Some(relay) = relay_url {
        let parsed = Url::parse(relay).map_err(|e| Error::InvalidUrl(format!("{}: {}", relay, e)))?;
        return Ok(Some(LlmEndpoint::Relay {
            url: parsed.to_string(),
        }));
    }
    Ok(api_key.map(|key| LlmEndpoint::Direct {
        url: DEFAULT_MESSAGES_URL.to_string(),
        api_key: key.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_resolution_order() {
        let mut config = PipelineConfig::default();
        assert_eq!(config.resolved_strategy(), StrategyKind::Static);

        config.search.api_key = Some("key".to_string());
        assert_eq!(config.resolved_strategy(), StrategyKind::Search);

        config.llm.endpoint = llm_endpoint(Some("http://localhost:8888/api/claude"), None).unwrap();
        assert_eq!(config.resolved_strategy(), StrategyKind::Llm);
    }

    #[test]
    fn test_explicit_strategy_without_credential_degrades() {
        let config = PipelineConfig {
            strategy: StrategyKind::Llm,
            ..Default::default()
        };
        assert_eq!(config.resolved_strategy(), StrategyKind::Static);

        let config = PipelineConfig {
            strategy: StrategyKind::Search,
            ..Default::default()
        };
        assert_eq!(config.resolved_strategy(), StrategyKind::Static);
    }

    #[test]
    fn test_relay_wins_over_direct_key() {
        let endpoint = llm_endpoint(Some("http://relay.local/api/claude"), Some("sk-test"))
            .unwrap()
            .unwrap();
        assert!(matches!(endpoint, LlmEndpoint::Relay { .. }));
        assert_eq!(endpoint.api_key(), None);

        let endpoint = llm_endpoint(None, Some("sk-test")).unwrap().unwrap();
        assert_eq!(endpoint.url(), DEFAULT_MESSAGES_URL);
        assert_eq!(endpoint.api_key(), Some("sk-test"));

        assert!(llm_endpoint(Some("not a url"), None).is_err());
        assert!(llm_endpoint(None, None).unwrap().is_none());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut config = PipelineConfig::default();
        config.search.api_key = Some("super-secret".to_string());
        config.llm.endpoint = llm_endpoint(None, Some("sk-very-secret")).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_strategy_kind_parsing() {
        assert_eq!("LLM".parse::<StrategyKind>(), Ok(StrategyKind::Llm));
        assert_eq!("mock".parse::<StrategyKind>(), Ok(StrategyKind::Static));
        assert!("rss".parse::<StrategyKind>().is_err());
        assert_eq!(StrategyKind::Search.to_string(), "search");
    }
}
