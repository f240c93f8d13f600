//! Turns untrusted raw records into canonical [`Article`]s.
//!
//! Every field is read defensively: wrong types, missing keys and junk values
//! fall back to defaults instead of failing the record. Only records that are
//! not JSON objects at all are dropped.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rand::Rng;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use nt_core::{Article, RawRecord, RecordTraits, Sentiment, Taxonomy};

pub const UNTITLED: &str = "Untitled report";
pub const UNKNOWN_SOURCE: &str = "Unknown source";
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Range the curator is asked to score on.
pub const MIN_IMPACT: f64 = 1.0;
pub const MAX_IMPACT: f64 = 10.0;

/// Produces an impact score for records that carry none.
pub type ImpactScorer = Arc<dyn Fn(&Article) -> f64 + Send + Sync>;

/// Uniform in [7.5, 9.9], one decimal.
pub fn random_impact(_article: &Article) -> f64 {
    let score: f64 = rand::thread_rng().gen_range(7.5..=9.9);
    (score * 10.0).round() / 10.0
}

#[derive(Clone)]
pub struct Normalizer {
    taxonomy: Taxonomy,
    scorer: ImpactScorer,
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("taxonomy", &self.taxonomy.name())
            .field("scorer", &"<fn>")
            .finish()
    }
}

impl Normalizer {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self {
            taxonomy,
            scorer: Arc::new(random_impact),
        }
    }

    pub fn with_scorer(mut self, scorer: ImpactScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Normalizes a single record. `prefix` and `index` build the fallback id.
    pub fn normalize(&self, record: &RawRecord, prefix: &str, index: usize, traits: RecordTraits) -> Article {
        let empty = Map::new();
        let fields = record.as_object().unwrap_or(&empty);

        let title = text_field(fields, &["title", "headline"]).unwrap_or_else(|| UNTITLED.to_string());
        let summary = text_field(fields, &["summary", "description", "content"]).unwrap_or_default();

        let supplied_category = if traits.supplies_category {
            text_field(fields, &["category", "industry"])
                .and_then(|c| self.taxonomy.canonical(&c).map(str::to_string))
        } else {
            None
        };
        let category = supplied_category
            .unwrap_or_else(|| self.taxonomy.classify(&title, &summary).to_string());

        let mut article = Article {
            id: text_field(fields, &["id"]).unwrap_or_else(|| generated_id(prefix, index)),
            title,
            summary,
            category,
            sentiment: text_field(fields, &["sentiment"]).and_then(|s| s.parse::<Sentiment>().ok()),
            impact_score: if traits.supplies_impact {
                number_field(fields, &["impactScore", "impact_score", "impact"])
                    .map(|score| score.clamp(MIN_IMPACT, MAX_IMPACT))
            } else {
                None
            },
            source: source_field(fields).unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
            date: date_field(fields, &["date", "publishedAt", "published_at"]),
            url: url_field(fields, &["url", "link"]),
            tags: tags_field(fields),
            featured: bool_field(fields, "featured"),
        };

        if article.impact_score.is_none() && !traits.supplies_impact {
            article.impact_score = Some((self.scorer)(&article));
        }
        article
    }

    /// Normalizes a batch: drops non-objects, makes ids unique and keeps at
    /// most one featured article.
    pub fn normalize_batch(&self, records: &[RawRecord], prefix: &str, traits: RecordTraits) -> Vec<Article> {
        let mut seen = HashSet::new();
        let mut articles = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            if !record.is_object() {
                debug!("dropping non-object record #{} from {}", index, prefix);
                continue;
            }
            let mut article = self.normalize(record, prefix, index, traits);
            if !seen.insert(article.id.clone()) {
                article.id = unique_id(&seen, prefix, index);
                seen.insert(article.id.clone());
            }
            articles.push(article);
        }

        let mut featured_seen = false;
        for article in articles.iter_mut() {
            if article.featured {
                if featured_seen {
                    article.featured = false;
                }
                featured_seen = true;
            }
        }
        if !featured_seen && traits.feature_first {
            if let Some(first) = articles.first_mut() {
                first.featured = true;
            }
        }
        articles
    }
}

fn generated_id(prefix: &str, index: usize) -> String {
    format!("{}-{}", prefix, index)
}

fn unique_id(seen: &HashSet<String>, prefix: &str, index: usize) -> String {
    let base = generated_id(prefix, index);
    if !seen.contains(&base) {
        return base;
    }
    (1..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !seen.contains(candidate))
        .unwrap_or(base)
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_field(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| fields.get(*k).and_then(text_of))
}

fn number_field(fields: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|k| match fields.get(*k)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
    .filter(|n| n.is_finite())
}

fn bool_field(fields: &Map<String, Value>, key: &str) -> bool {
    match fields.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Publisher name, either a plain string or a `{ "name": ... }` object.
fn source_field(fields: &Map<String, Value>) -> Option<String> {
    match fields.get("source")? {
        Value::Object(source) => source.get("name").and_then(text_of),
        other => text_of(other),
    }
}

fn url_field(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    let raw = text_field(fields, keys)?;
    let parsed = Url::parse(&raw).ok()?;
    matches!(parsed.scheme(), "http" | "https").then_some(raw)
}

fn tags_field(fields: &Map<String, Value>) -> Vec<String> {
    match fields.get("tags") {
        Some(Value::Array(items)) => items.iter().filter_map(text_of).collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn date_field(fields: &Map<String, Value>, keys: &[&str]) -> String {
    for key in keys {
        match fields.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return format_date(s),
            Some(Value::Number(n)) => {
                if let Some(date) = n.as_i64().and_then(format_epoch) {
                    return date;
                }
            }
            _ => {}
        }
    }
    UNKNOWN_DATE.to_string()
}

/// Calendar date for recognised timestamps, the raw text otherwise.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Utc).format("%Y-%m-%d").to_string();
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return parsed.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

/// Seconds or milliseconds since the epoch.
fn format_epoch(value: i64) -> Option<String> {
    let millis = if value.unsigned_abs() < 100_000_000_000 { value.checked_mul(1000)? } else { value };
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
}
