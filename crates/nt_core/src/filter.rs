//! Pure view derivation over a published article collection.

use serde::{Deserialize, Serialize};

use crate::taxonomy::ALL_CATEGORIES;
use crate::types::Article;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, rename = "q")]
    pub query: String,
}

fn default_category() -> String {
    ALL_CATEGORIES.to_string()
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            category: default_category(),
            query: String::new(),
        }
    }
}

impl FilterCriteria {
    pub fn new(category: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            query: query.into(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn is_unfiltered(&self) -> bool {
        self.category == ALL_CATEGORIES && self.query.is_empty()
    }

    pub fn matches(&self, article: &Article) -> bool {
        let category_ok = self.category == ALL_CATEGORIES || article.category == self.category;
        if !category_ok {
            return false;
        }
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        article.title.to_lowercase().contains(&needle)
            || article.summary.to_lowercase().contains(&needle)
    }
}

/// Visible subset of `articles`, input order preserved.
pub fn filter(articles: &[Article], criteria: &FilterCriteria) -> Vec<Article> {
    articles
        .iter()
        .filter(|a| criteria.matches(a))
        .cloned()
        .collect()
}

/// The article to headline a view: first featured one, else the first one.
pub fn featured(articles: &[Article]) -> Option<&Article> {
    articles
        .iter()
        .find(|a| a.featured)
        .or_else(|| articles.first())
}
