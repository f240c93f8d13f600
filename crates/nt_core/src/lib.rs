pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod strategy;
pub mod taxonomy;
pub mod types;

pub use config::{LlmConfig, LlmEndpoint, PipelineConfig, SearchConfig, StrategyKind};
pub use error::{Error, StrategyError};
pub use filter::{featured, filter, FilterCriteria};
pub use strategy::{NewsStrategy, RawRecord, RecordTraits};
pub use taxonomy::{ClassificationRule, Taxonomy, TaxonomyKind, ALL_CATEGORIES};
pub use types::{Article, ImpactBand, RetrievalResult, Sentiment};

pub type Result<T> = std::result::Result<T, Error>;
