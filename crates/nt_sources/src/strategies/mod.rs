use std::sync::Arc;

use nt_core::{NewsStrategy, PipelineConfig, Result, StrategyKind, Taxonomy};
use nt_inference::LanguageModel;

use crate::catalog::catalog_for;

pub mod curator;
pub mod fixed;
pub mod gnews;

pub use curator::LlmStrategy;
pub use fixed::StaticStrategy;
pub use gnews::SearchStrategy;

/// Builds the strategy the configuration resolves to. `model` overrides the
/// configured LLM endpoint when given.
pub fn build_strategy(
    config: &PipelineConfig,
    model: Option<Arc<dyn LanguageModel>>,
) -> Result<Arc<dyn NewsStrategy>> {
    let taxonomy = Taxonomy::for_kind(config.taxonomy);
    let kind = match (config.strategy, &model) {
        (StrategyKind::Auto | StrategyKind::Llm, Some(_)) => StrategyKind::Llm,
        _ => config.resolved_strategy(),
    };

    let strategy: Arc<dyn NewsStrategy> = match kind {
        StrategyKind::Llm => {
            let model = match model {
                Some(model) => Some(model),
                None => nt_inference::create_model(config)?,
            };
            match model {
                Some(model) => Arc::new(LlmStrategy::new(model, config.llm.clone(), &taxonomy)),
                None => static_strategy(config),
            }
        }
        StrategyKind::Search => Arc::new(SearchStrategy::new(config.search.clone(), config.timeout)?),
        StrategyKind::Static | StrategyKind::Auto => static_strategy(config),
    };
    tracing::info!("🦗 Using {} strategy ({} taxonomy)", strategy.name(), taxonomy.name());
    Ok(strategy)
}

fn static_strategy(config: &PipelineConfig) -> Arc<dyn NewsStrategy> {
    Arc::new(StaticStrategy::new(catalog_for(config.taxonomy), config.static_delay))
}
