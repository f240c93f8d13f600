use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use nt_core::{
    Article, Error, NewsStrategy, PipelineConfig, RetrievalResult, Result, StrategyError, Taxonomy,
};
use nt_inference::LanguageModel;

use crate::catalog::catalog_for;
use crate::normalizer::{ImpactScorer, Normalizer};
use crate::strategies::build_strategy;

/// What the presentation layer observes: the last settled result and
/// whether a newer run is still in flight.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalSnapshot {
    pub result: Option<RetrievalResult>,
    pub loading: bool,
    pub generation: u64,
}

/// Runs a strategy, normalizes its output and publishes the result.
///
/// Each run takes a generation token. A run only publishes if no newer run
/// has started since, so a slow superseded request can never overwrite
/// fresher data. The state lock is never held across an await.
pub struct RetrievalManager {
    strategy: Arc<dyn NewsStrategy>,
    normalizer: Normalizer,
    fallback: Vec<Article>,
    timeout: Duration,
    generation: AtomicU64,
    state: Mutex<RetrievalSnapshot>,
}

/// Clears `loading` when a run ends without publishing, e.g. because its
/// future was dropped mid-fetch.
struct LoadingGuard<'a> {
    manager: &'a RetrievalManager,
    token: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.manager.lock_state();
        if self.manager.generation.load(Ordering::SeqCst) == self.token && state.loading {
            debug!("Run #{} ended without publishing, clearing loading", self.token);
            state.loading = false;
        }
    }
}

impl RetrievalManager {
    pub fn new(strategy: Arc<dyn NewsStrategy>, taxonomy: Taxonomy, fallback: Vec<Article>) -> Result<Self> {
        if fallback.is_empty() {
            return Err(Error::Config("fallback article set must not be empty".to_string()));
        }
        Ok(Self {
            strategy,
            normalizer: Normalizer::new(taxonomy),
            fallback,
            timeout: Duration::from_secs(30),
            generation: AtomicU64::new(0),
            state: Mutex::new(RetrievalSnapshot::default()),
        })
    }

    /// Wires strategy, taxonomy, fallback catalog and timeout from configuration.
    pub fn from_config(config: &PipelineConfig, model: Option<Arc<dyn LanguageModel>>) -> Result<Self> {
        let strategy = build_strategy(config, model)?;
        Ok(Self::new(
            strategy,
            Taxonomy::for_kind(config.taxonomy),
            catalog_for(config.taxonomy),
        )?
        .with_timeout(config.timeout))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_scorer(mut self, scorer: ImpactScorer) -> Self {
        self.normalizer = self.normalizer.with_scorer(scorer);
        self
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        self.normalizer.taxonomy()
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> RetrievalSnapshot {
        self.lock_state().clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, RetrievalSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs the configured strategy.
    pub async fn run(&self, query: Option<&str>) -> RetrievalResult {
        let strategy = self.strategy.clone();
        self.run_with(strategy.as_ref(), query).await
    }

    /// Runs `strategy` once. Never fails: any strategy error yields the
    /// fallback set together with a warning message.
    pub async fn run_with(&self, strategy: &dyn NewsStrategy, query: Option<&str>) -> RetrievalResult {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.lock_state();
            // a newer run may already have started and settled
            if self.generation.load(Ordering::SeqCst) == token {
                state.loading = true;
            }
        }
        let _guard = LoadingGuard { manager: self, token };

        info!("📰 Run #{} fetching from {}", token, strategy.name());
        let started = Instant::now();
        let outcome = if strategy.needs_deadline() {
            match tokio::time::timeout(self.timeout, strategy.fetch(query)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(StrategyError::Timeout(self.timeout)),
            }
        } else {
            strategy.fetch(query).await
        };

        let result = match outcome {
            Ok(records) => {
                let articles = self
                    .normalizer
                    .normalize_batch(&records, strategy.name(), strategy.record_traits());
                info!(
                    "✨ Run #{} got {} records, {} usable, in {:?}",
                    token,
                    records.len(),
                    articles.len(),
                    started.elapsed()
                );
                if articles.is_empty() {
                    info!("Run #{} returned nothing usable, showing curated articles", token);
                    RetrievalResult::success(self.fallback.clone())
                } else {
                    RetrievalResult::success(articles)
                }
            }
            Err(err) => {
                warn!("⚠️ Run #{} failed ({}): {}", token, err.kind(), err);
                RetrievalResult::degraded(self.fallback.clone(), warning_message(&err))
            }
        };

        self.publish(token, &result);
        result
    }

    fn publish(&self, token: u64, result: &RetrievalResult) -> bool {
        let mut state = self.lock_state();
        if self.generation.load(Ordering::SeqCst) != token {
            debug!("Discarding result of superseded run #{}", token);
            return false;
        }
        state.result = Some(result.clone());
        state.generation = token;
        state.loading = false;
        true
    }
}

pub fn warning_message(err: &StrategyError) -> String {
    format!("Could not reach live news source ({}). Showing cached results.", err)
}
