use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical, schema-complete news item handed to every consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_score: Option<f64>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

impl Article {
    pub fn impact_band(&self) -> ImpactBand {
        match self.impact_score {
            Some(score) if score >= 9.0 => ImpactBand::Breakthrough,
            Some(score) if score >= 8.0 => ImpactBand::High,
            Some(_) => ImpactBand::Moderate,
            None => ImpactBand::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Neutral,
    Critical,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "bullish",
            Sentiment::Neutral => "neutral",
            Sentiment::Critical => "critical",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bullish" => Ok(Sentiment::Bullish),
            "neutral" => Ok(Sentiment::Neutral),
            "critical" => Ok(Sentiment::Critical),
            other => Err(format!("Unknown sentiment: {}", other)),
        }
    }
}

/// Display bucket for an impact score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactBand {
    Breakthrough,
    High,
    Moderate,
    None,
}

/// Output of one retrieval run. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalResult {
    pub articles: Vec<Article>,
    pub error: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl RetrievalResult {
    pub fn success(articles: Vec<Article>) -> Self {
        Self {
            articles,
            error: None,
            fetched_at: Utc::now(),
        }
    }

    pub fn degraded(fallback: Vec<Article>, error: impl Into<String>) -> Self {
        Self {
            articles: fallback,
            error: Some(error.into()),
            fetched_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(score: Option<f64>) -> Article {
        Article {
            id: "t-0".to_string(),
            title: "Test Article".to_string(),
            summary: "Summary".to_string(),
            category: "Software".to_string(),
            sentiment: None,
            impact_score: score,
            source: "test".to_string(),
            date: "2026-02-25".to_string(),
            url: None,
            tags: vec![],
            featured: false,
        }
    }

    #[test]
    fn test_impact_band_thresholds() {
        assert_eq!(article(Some(9.2)).impact_band(), ImpactBand::Breakthrough);
        assert_eq!(article(Some(9.0)).impact_band(), ImpactBand::Breakthrough);
        assert_eq!(article(Some(8.5)).impact_band(), ImpactBand::High);
        assert_eq!(article(Some(7.9)).impact_band(), ImpactBand::Moderate);
        assert_eq!(article(None).impact_band(), ImpactBand::None);
    }

    #[test]
    fn test_sentiment_parsing() {
        assert_eq!("Bullish".parse::<Sentiment>(), Ok(Sentiment::Bullish));
        assert_eq!(" critical ".parse::<Sentiment>(), Ok(Sentiment::Critical));
        assert!("euphoric".parse::<Sentiment>().is_err());
    }

    #[test]
    fn test_article_serializes_camel_case() {
        let json = serde_json::to_value(article(Some(8.1))).unwrap();
        assert_eq!(json["impactScore"], 8.1);
        assert!(json.get("url").is_none());
        assert!(json.get("sentiment").is_none());
    }
}
