//! Curated articles served by the static strategy and used as the fallback
//! whenever a live strategy fails.

use nt_core::{Article, Sentiment, TaxonomyKind};

pub fn catalog_for(kind: TaxonomyKind) -> Vec<Article> {
    match kind {
        TaxonomyKind::Industries => industry_catalog(),
        TaxonomyKind::Topics => topic_catalog(),
    }
}

pub fn industry_catalog() -> Vec<Article> {
    vec![
        Article {
            id: "m1".to_string(),
            title: "GlobalPharma Deploys Swarm Agents for Accelerated Drug Discovery".to_string(),
            summary: "A network of specialized AI agents has successfully simulated complex protein folding scenarios, reducing initial screening times by 80%.".to_string(),
            category: "Healthcare".to_string(),
            sentiment: None,
            impact_score: Some(9.2),
            source: "BioTech Insider".to_string(),
            date: "2026-02-25".to_string(),
            url: None,
            tags: tags(&["Swarm Intelligence", "R&D"]),
            featured: true,
        },
        Article {
            id: "m2".to_string(),
            title: "FinTech Giant Replaces Level 1 Support with Empathetic Negotiation Agents".to_string(),
            summary: "Customer service in banking takes a leap as new autonomous agents not only resolve queries but negotiate minor fee waivers and draft personalized financial plans.".to_string(),
            category: "Finance".to_string(),
            sentiment: None,
            impact_score: Some(8.5),
            source: "Financial Times".to_string(),
            date: "2026-02-24".to_string(),
            url: None,
            tags: tags(&["Customer Experience", "Autonomy"]),
            featured: false,
        },
        Article {
            id: "m3".to_string(),
            title: "Supply Chain Agents Predict and Mitigate Pacific Shipping Delays".to_string(),
            summary: "Using real-time weather and geopolitical data, logistics agents successfully rerouted $2B worth of cargo autonomously.".to_string(),
            category: "Logistics".to_string(),
            sentiment: None,
            impact_score: Some(7.9),
            source: "Logistics Weekly".to_string(),
            date: "2026-02-20".to_string(),
            url: None,
            tags: tags(&["Predictive Analytics", "Routing"]),
            featured: false,
        },
    ]
}

pub fn topic_catalog() -> Vec<Article> {
    vec![
        Article {
            id: "t1".to_string(),
            title: "Open Agent Protocol Reaches 1.0 With Cross-Vendor Tool Calling".to_string(),
            summary: "The framework now lets agents built on different SDKs discover and invoke each other's tools through one shared schema.".to_string(),
            category: "Frameworks".to_string(),
            sentiment: Some(Sentiment::Bullish),
            impact_score: Some(8.8),
            source: "Agent Weekly".to_string(),
            date: "2026-02-26".to_string(),
            url: None,
            tags: tags(&["Interoperability", "Tool Use"]),
            featured: true,
        },
        Article {
            id: "t2".to_string(),
            title: "Study Finds Long-Horizon Agents Still Struggle With Error Recovery".to_string(),
            summary: "Benchmarks across 40 multi-step tasks show success rates falling sharply once a single intermediate step fails.".to_string(),
            category: "Research".to_string(),
            sentiment: Some(Sentiment::Critical),
            impact_score: Some(7.6),
            source: "ML Review".to_string(),
            date: "2026-02-24".to_string(),
            url: None,
            tags: tags(&["Benchmarks", "Reliability"]),
            featured: false,
        },
        Article {
            id: "t3".to_string(),
            title: "Insurers Move Claims Triage to Supervised Agent Pipelines".to_string(),
            summary: "Three carriers report faster settlement times after routing first-pass review to agents with human sign-off.".to_string(),
            category: "Enterprise".to_string(),
            sentiment: Some(Sentiment::Neutral),
            impact_score: Some(8.1),
            source: "Enterprise AI Journal".to_string(),
            date: "2026-02-22".to_string(),
            url: None,
            tags: tags(&["Human-on-the-loop", "Insurance"]),
            featured: false,
        },
        Article {
            id: "t4".to_string(),
            title: "Regulators Publish Draft Accountability Rules for Autonomous Agents".to_string(),
            summary: "The proposal would require audit logs and a named human owner for agents acting on behalf of consumers.".to_string(),
            category: "Policy".to_string(),
            sentiment: Some(Sentiment::Neutral),
            impact_score: Some(8.4),
            source: "Policy Wire".to_string(),
            date: "2026-02-19".to_string(),
            url: None,
            tags: tags(&["Governance", "Audit"]),
            featured: false,
        },
    ]
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}
