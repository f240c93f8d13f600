//! News retrieval: fetch strategies, normalization and the retrieval manager.

pub mod catalog;
pub mod extract;
pub mod manager;
pub mod normalizer;
pub mod strategies;

pub use manager::{RetrievalManager, RetrievalSnapshot};
pub use normalizer::{ImpactScorer, Normalizer};
pub use strategies::{build_strategy, LlmStrategy, SearchStrategy, StaticStrategy};

pub mod prelude {
    pub use super::manager::RetrievalManager;
    pub use super::strategies::build_strategy;
    pub use nt_core::{Article, Error, NewsStrategy, Result, RetrievalResult};
}
