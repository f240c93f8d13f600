use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

use nt_core::{filter, Article, FilterCriteria, LlmConfig, SearchConfig, Taxonomy};
use nt_inference::DummyModel;
use nt_sources::catalog::{industry_catalog, topic_catalog};
use nt_sources::{LlmStrategy, RetrievalManager, SearchStrategy};

const CATEGORIES: [&str; 6] = ["Frameworks", "Research", "Products", "Enterprise", "Open Source", "Policy"];
const SENTIMENTS: [&str; 3] = ["bullish", "neutral", "critical"];

fn curated_items(count: usize) -> Value {
    let items: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "title": format!("Story {}", i),
                "summary": format!("Summary of story {}", i),
                "category": CATEGORIES[i % CATEGORIES.len()],
                "sentiment": SENTIMENTS[i % SENTIMENTS.len()],
                "impactScore": 6.0 + i as f64 / 2.0,
                "source": "Agent Wire",
                "date": "2026-02-27",
                "url": format!("https://agentwire.example/{}", i),
                "tags": ["Agents"],
                "featured": i == 0
            })
        })
        .collect();
    Value::Array(items)
}

fn llm_manager(model: DummyModel) -> RetrievalManager {
    let taxonomy = Taxonomy::topics();
    let strategy = LlmStrategy::new(Arc::new(model), LlmConfig::default(), &taxonomy);
    RetrievalManager::new(Arc::new(strategy), taxonomy, topic_catalog()).unwrap()
}

#[tokio::test]
async fn fenced_model_output_yields_all_items_verbatim() {
    let text = format!(
        "Here are this week's stories:\n```json\n{}\n```",
        serde_json::to_string_pretty(&curated_items(8)).unwrap()
    );
    let manager = llm_manager(DummyModel::replying(text));

    let result = manager.run(Some("agent frameworks")).await;
    assert!(result.error.is_none());
    assert_eq!(result.articles.len(), 8);
    for (i, article) in result.articles.iter().enumerate() {
        assert_eq!(article.title, format!("Story {}", i));
        assert_eq!(article.category, CATEGORIES[i % CATEGORIES.len()]);
        assert_eq!(article.sentiment.map(|s| s.as_str()), Some(SENTIMENTS[i % SENTIMENTS.len()]));
        assert_eq!(article.impact_score, Some(6.0 + i as f64 / 2.0));
        assert_eq!(article.id, format!("llm-{}", i));
    }
    assert_eq!(result.articles.iter().filter(|a| a.featured).count(), 1);

    let policy = filter(&result.articles, &FilterCriteria::default().with_category("Policy"));
    assert_eq!(policy.len(), 1);
    assert_eq!(policy[0].title, "Story 5");
}

#[tokio::test]
async fn prose_answer_degrades_to_fallback() {
    let manager = llm_manager(DummyModel::replying("The search tool is unavailable today."));
    let result = manager.run(None).await;
    assert_eq!(result.articles, topic_catalog());
    assert!(result.error.unwrap().contains("no JSON array found"));
}

#[tokio::test]
async fn malformed_items_are_repaired_not_rejected() {
    let text = r#"[{"title": "Agents at work", "category": "Gossip", "sentiment": "ecstatic"}, 17, {"summary": "no title"}]"#;
    let manager = llm_manager(DummyModel::replying(text));
    let result = manager.run(None).await;
    assert!(result.error.is_none());
    assert_eq!(result.articles.len(), 2);
    let first: &Article = &result.articles[0];
    assert_eq!(first.category, "Research");
    assert_eq!(first.sentiment, None);
    assert_eq!(result.articles[1].title, "Untitled report");
}

async fn serve_search(body: Value, status: StatusCode) -> String {
    let router = Router::new().route(
        "/api/v4/search",
        get(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api/v4/search", addr)
}

fn search_manager(base_url: String) -> RetrievalManager {
    let strategy = SearchStrategy::new(
        SearchConfig {
            base_url,
            api_key: Some("test-key".to_string()),
            ..Default::default()
        },
        Duration::from_secs(5),
    )
    .unwrap();
    RetrievalManager::new(Arc::new(strategy), Taxonomy::industries(), industry_catalog())
        .unwrap()
        .with_scorer(Arc::new(|_: &Article| 8.8))
}

#[tokio::test]
async fn search_results_are_classified_and_scored() {
    let url = serve_search(
        json!({
            "totalArticles": 3,
            "articles": [
                {
                    "title": "Hospitals pilot agentic triage",
                    "description": "Medical teams see shorter waits.",
                    "url": "https://news.example/triage",
                    "publishedAt": "2026-02-24T09:30:00Z",
                    "source": { "name": "Health Wire", "url": "https://news.example" }
                },
                {
                    "title": "Agents rewrite legacy code",
                    "description": "A large codebase migrated overnight.",
                    "url": "https://news.example/code",
                    "publishedAt": "2026-02-23T18:00:00Z",
                    "source": { "name": "Dev Daily" }
                },
                {
                    "title": "Ports adopt autonomous scheduling",
                    "description": "Supply chains rebalance in real time.",
                    "publishedAt": "not a date",
                    "source": { "name": "Port News" }
                }
            ]
        }),
        StatusCode::OK,
    )
    .await;

    let result = search_manager(url).run(None).await;
    assert!(result.error.is_none());
    let categories: Vec<_> = result.articles.iter().map(|a| a.category.as_str()).collect();
    assert_eq!(categories, vec!["Healthcare", "Software", "Logistics"]);
    assert!(result.articles.iter().all(|a| a.impact_score == Some(8.8)));
    assert!(result.articles[0].featured);
    assert_eq!(result.articles[0].date, "2026-02-24");
    assert_eq!(result.articles[2].date, "not a date");
    assert_eq!(result.articles[1].source, "Dev Daily");
    assert_eq!(result.articles[1].tags, vec!["AI", "Agents", "Automation"]);
    assert_eq!(result.articles[2].url, None);
    assert!(result.articles.iter().all(|a| a.sentiment.is_none()));
}

#[tokio::test]
async fn search_error_status_degrades_to_fallback() {
    let url = serve_search(json!({ "errors": ["quota"] }), StatusCode::TOO_MANY_REQUESTS).await;
    let result = search_manager(url).run(None).await;
    assert_eq!(result.articles, industry_catalog());
    assert!(result.error.unwrap().contains("429"));
}
