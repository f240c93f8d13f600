use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use nt_core::config::{llm_endpoint, ENV_LLM_API_KEY, ENV_RELAY_URL, ENV_SEARCH_API_KEY};
use nt_core::logging::{directive_for, init_logging};
use nt_core::{featured, filter, Article, FilterCriteria, ImpactBand, PipelineConfig, StrategyKind, TaxonomyKind};
use nt_sources::RetrievalManager;
use nt_web::{create_app, AppState, Relay};

mod duration;

use duration::HumanDuration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Agentic AI news tracker", long_about = None)]
pub struct Cli {
    /// Retrieval strategy: auto, static, search or llm
    #[arg(long, global = true, default_value = "auto")]
    strategy: StrategyKind,
    /// Category scheme: industries or topics
    #[arg(long, global = true, default_value = "industries")]
    taxonomy: TaxonomyKind,
    /// Bounded wait for one retrieval (e.g. 30s, 1m)
    #[arg(long, global = true, default_value = "30s")]
    timeout: HumanDuration,
    #[arg(long, global = true, env = ENV_SEARCH_API_KEY, hide_env_values = true)]
    gnews_api_key: Option<String>,
    #[arg(long, global = true, env = ENV_LLM_API_KEY, hide_env_values = true)]
    anthropic_key: Option<String>,
    /// Send LLM requests through this relay instead of calling the provider directly
    #[arg(long, global = true, env = ENV_RELAY_URL)]
    relay_url: Option<String>,
    #[arg(long, global = true)]
    model: Option<String>,
    /// Number of items the LLM strategy asks for
    #[arg(long, global = true)]
    items: Option<usize>,
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the pipeline once and print the resulting articles
    Fetch {
        #[arg(long, default_value = "All")]
        category: String,
        /// Case-insensitive text filter over titles and summaries
        #[arg(long, default_value = "")]
        query: String,
        /// Topic handed to the live source
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Serve the dashboard API and the LLM relay
    Serve {
        #[arg(long, default_value = "127.0.0.1:8888")]
        addr: SocketAddr,
    },
    /// List the filter options of the selected taxonomy
    Categories,
    /// List trending topics
    Trending,
}

impl Cli {
    fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = PipelineConfig {
            strategy: self.strategy,
            taxonomy: self.taxonomy,
            timeout: self.timeout.0,
            ..PipelineConfig::default()
        };
        config.search.api_key = non_empty(&self.gnews_api_key);
        config.llm.endpoint = llm_endpoint(
            non_empty(&self.relay_url).as_deref(),
            non_empty(&self.anthropic_key).as_deref(),
        )?;
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        if let Some(items) = self.items {
            config.llm.item_count = items;
        }
        Ok(config)
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.trim().is_empty())
}

fn build_manager(config: &PipelineConfig) -> Result<RetrievalManager> {
    let model = nt_inference::create_model(config)?;
    Ok(RetrievalManager::from_config(config, model)?)
}

fn impact_label(article: &Article) -> String {
    match (article.impact_band(), article.impact_score) {
        (ImpactBand::Breakthrough, Some(score)) => format!("{:.1} breakthrough", score),
        (ImpactBand::High, Some(score)) => format!("{:.1} high", score),
        (_, Some(score)) => format!("{:.1}", score),
        _ => "-".to_string(),
    }
}

fn print_article(article: &Article, headline: bool) {
    let marker = if headline { "★" } else { "•" };
    println!("{} [{}] {}", marker, article.category, article.title);
    let sentiment = article.sentiment.map(|s| format!(" · {}", s)).unwrap_or_default();
    println!(
        "    {} · {} · impact {}{}",
        article.source,
        article.date,
        impact_label(article),
        sentiment
    );
    if !article.summary.is_empty() {
        println!("    {}", article.summary);
    }
    if let Some(url) = &article.url {
        println!("    {}", url);
    }
}

async fn fetch(config: &PipelineConfig, criteria: FilterCriteria, topic: Option<String>, json: bool) -> Result<()> {
    let manager = build_manager(config)?;
    let result = manager.run(topic.as_deref()).await;
    if let Some(error) = &result.error {
        warn!("{}", error);
    }

    let visible = filter(&result.articles, &criteria);
    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    if visible.is_empty() {
        println!("No articles match the current filters.");
        return Ok(());
    }
    let headline = if criteria.query.is_empty() {
        featured(&visible)
    } else {
        None
    };
    if let Some(article) = headline {
        print_article(article, true);
    }
    for article in visible.iter().filter(|a| Some(a.id.as_str()) != headline.map(|h| h.id.as_str())) {
        print_article(article, false);
    }
    println!("\n{} of {} articles", visible.len(), result.articles.len());
    Ok(())
}

async fn serve(config: &PipelineConfig, anthropic_key: Option<String>, addr: SocketAddr) -> Result<()> {
    let manager = Arc::new(build_manager(config)?);
    let relay = Relay::new(anthropic_key, config.timeout)?;
    if !relay.is_configured() {
        warn!("Relay has no {}, /api/claude will answer 503", ENV_LLM_API_KEY);
    }

    let app = create_app(AppState {
        manager: manager.clone(),
        relay,
        trending_topics: config.trending_topics.clone(),
    });

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("🌐 Serving on http://{}", listener.local_addr()?);

    // the pipeline may point at this server's own relay, so run it after binding
    tokio::spawn(async move {
        manager.run(None).await;
    });

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(directive_for(cli.verbose));

    let config = cli.pipeline_config()?;
    match cli.command {
        Commands::Fetch {
            category,
            query,
            topic,
            json,
        } => fetch(&config, FilterCriteria::new(category, query), topic, json).await,
        Commands::Serve { addr } => serve(&config, non_empty(&cli.anthropic_key), addr).await,
        Commands::Categories => {
            let taxonomy = nt_core::Taxonomy::for_kind(config.taxonomy);
            for option in taxonomy.filter_options() {
                println!("{}", option);
            }
            Ok(())
        }
        Commands::Trending => {
            for topic in &config.trending_topics {
                println!("{}", topic);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("nt").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["fetch", "--strategy", "static", "--timeout", "5s", "--category", "Finance"]);
        let config = cli.pipeline_config().unwrap();
        assert_eq!(config.strategy, StrategyKind::Static);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(matches!(cli.command, Commands::Fetch { ref category, .. } if category == "Finance"));
    }

    #[test]
    fn test_relay_url_wins_over_key() {
        let cli = parse(&[
            "--anthropic-key",
            "sk-test",
            "--relay-url",
            "http://127.0.0.1:8888/api/claude",
            "--items",
            "5",
            "trending",
        ]);
        let config = cli.pipeline_config().unwrap();
        let endpoint = config.llm.endpoint.unwrap();
        assert_eq!(endpoint.url(), "http://127.0.0.1:8888/api/claude");
        assert_eq!(endpoint.api_key(), None);
        assert_eq!(config.llm.item_count, 5);
    }

    #[test]
    fn test_bad_relay_url_is_an_error() {
        let cli = parse(&["--relay-url", "not a url", "categories"]);
        assert!(cli.pipeline_config().is_err());
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        assert!(Cli::try_parse_from(["nt", "--strategy", "psychic", "fetch"]).is_err());
    }

    #[test]
    fn test_impact_label() {
        let mut article = nt_sources::catalog::industry_catalog().remove(0);
        assert_eq!(impact_label(&article), "9.2 breakthrough");
        article.impact_score = Some(7.0);
        assert_eq!(impact_label(&article), "7.0");
        article.impact_score = None;
        assert_eq!(impact_label(&article), "-");
    }
}
