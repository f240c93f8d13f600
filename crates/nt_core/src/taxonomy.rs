//! Closed category sets and the keyword classifier that maps free text onto them.
//!
//! A [`Taxonomy`] is plain data handed to the retrieval manager at
//! construction, so alternative label sets can be swapped in without touching
//! any global state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Sentinel category meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// One row of the ordered rule list: any keyword hit assigns `category`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub category: String,
    pub keywords: Vec<String>,
}

impl ClassificationRule {
    pub fn new(category: &str, keywords: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn matches(&self, haystack: &str) -> bool {
        self.keywords.iter().any(|k| haystack.contains(k.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyKind {
    Industries,
    Topics,
}

impl FromStr for TaxonomyKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "industries" | "industry" => Ok(TaxonomyKind::Industries),
            "topics" | "topic" => Ok(TaxonomyKind::Topics),
            other => Err(format!("Unknown taxonomy: {}", other)),
        }
    }
}

impl fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxonomyKind::Industries => f.write_str("industries"),
            TaxonomyKind::Topics => f.write_str("topics"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    name: String,
    categories: Vec<String>,
    rules: Vec<ClassificationRule>,
    default_category: String,
}

impl Taxonomy {
    /// Builds a taxonomy, rejecting rules or defaults that point outside the label set.
    pub fn new(
        name: impl Into<String>,
        categories: Vec<String>,
        rules: Vec<ClassificationRule>,
        default_category: impl Into<String>,
    ) -> Result<Self> {
        let default_category = default_category.into();
        if categories.is_empty() {
            return Err(Error::Taxonomy("taxonomy has no categories".to_string()));
        }
        if categories.iter().any(|c| c == ALL_CATEGORIES) {
            return Err(Error::Taxonomy(format!(
                "'{}' is reserved for the unfiltered view",
                ALL_CATEGORIES
            )));
        }
        if !categories.contains(&default_category) {
            return Err(Error::Taxonomy(format!(
                "default category '{}' is not part of the taxonomy",
                default_category
            )));
        }
        if let Some(rule) = rules.iter().find(|r| !categories.contains(&r.category)) {
            return Err(Error::Taxonomy(format!(
                "rule targets unknown category '{}'",
                rule.category
            )));
        }
        Ok(Self {
            name: name.into(),
            categories,
            rules,
            default_category,
        })
    }

    pub fn for_kind(kind: TaxonomyKind) -> Self {
        match kind {
            TaxonomyKind::Industries => Self::industries(),
            TaxonomyKind::Topics => Self::topics(),
        }
    }

    /// Sector labels used when articles come from the keyword search API.
    pub fn industries() -> Self {
        Self {
            name: "industries".to_string(),
            categories: labels(&[
                "Software",
                "Healthcare",
                "Finance",
                "Manufacturing",
                "Logistics",
                "Education",
            ]),
            rules: vec![
                ClassificationRule::new("Healthcare", &["health", "drug", "medical"]),
                ClassificationRule::new("Finance", &["bank", "finance", "audit"]),
                ClassificationRule::new("Manufacturing", &["factory", "robot", "manufacturing"]),
                ClassificationRule::new("Logistics", &["ship", "logistics", "supply"]),
                ClassificationRule::new("Education", &["learn", "education", "tutor"]),
            ],
            default_category: "Software".to_string(),
        }
    }

    /// Topic labels the LLM curator is asked to use.
    pub fn topics() -> Self {
        Self {
            name: "topics".to_string(),
            categories: labels(&[
                "Frameworks",
                "Research",
                "Products",
                "Enterprise",
                "Open Source",
                "Policy",
            ]),
            rules: vec![
                ClassificationRule::new(
                    "Policy",
                    &["regulat", "policy", "legislat", "government", "compliance", "lawmaker"],
                ),
                ClassificationRule::new(
                    "Open Source",
                    &["open source", "open-source", "github", "open weights", "apache 2.0"],
                ),
                ClassificationRule::new(
                    "Frameworks",
                    &["framework", "sdk", "langchain", "langgraph", "autogen", "crewai", "toolkit"],
                ),
                ClassificationRule::new(
                    "Enterprise",
                    &["enterprise", "customer", "deploy", "workflow", "business", "fortune 500"],
                ),
                ClassificationRule::new(
                    "Products",
                    &["launch", "release", "product", "available today", "pricing", "app "],
                ),
            ],
            default_category: "Research".to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    /// Categories prefixed with the "All" sentinel, in display order.
    pub fn filter_options(&self) -> Vec<String> {
        std::iter::once(ALL_CATEGORIES.to_string())
            .chain(self.categories.iter().cloned())
            .collect()
    }

    /// Canonical spelling of `label` if it belongs to this taxonomy.
    pub fn canonical(&self, label: &str) -> Option<&str> {
        let label = label.trim();
        self.categories
            .iter()
            .find(|c| c.eq_ignore_ascii_case(label))
            .map(String::as_str)
    }

    /// Case-insensitive substring match over title and summary; first rule wins.
    pub fn classify(&self, title: &str, summary: &str) -> &str {
        let haystack = format!("{} {}", title, summary).to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&haystack))
            .map(|rule| rule.category.as_str())
            .unwrap_or(&self.default_category)
    }
}

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_keywords_win() {
        let taxonomy = Taxonomy::industries();
        assert_eq!(
            taxonomy.classify("New drug pipeline", "Agents fold protein structures"),
            "Healthcare"
        );
    }

    #[test]
    fn test_default_when_nothing_matches() {
        assert_eq!(Taxonomy::industries().classify("Agents write code", ""), "Software");
        assert_eq!(Taxonomy::topics().classify("A quiet week", "nothing to see"), "Research");
    }

    #[test]
    fn test_first_rule_wins_on_ties() {
        let taxonomy = Taxonomy::industries();
        // both "medical" (Healthcare) and "bank" (Finance) match
        assert_eq!(taxonomy.classify("Medical bank merges", ""), "Healthcare");
        // "robot" (Manufacturing) precedes "supply" (Logistics)
        assert_eq!(taxonomy.classify("Robot fleets", "supply depots"), "Manufacturing");
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        let taxonomy = Taxonomy::industries();
        assert_eq!(taxonomy.classify("AUDIT AGENTS", ""), "Finance");
        assert_eq!(taxonomy.classify("", "Online TUTORING at scale"), "Education");
    }

    #[test]
    fn test_classify_is_total_and_closed() {
        let taxonomy = Taxonomy::topics();
        for (title, summary) in [
            ("", ""),
            ("EU regulators draft agent rules", ""),
            ("LangGraph 1.0", "framework update"),
            ("Acme launches agent app ", ""),
        ] {
            let category = taxonomy.classify(title, summary);
            assert!(taxonomy.categories().iter().any(|c| c == category));
            assert_eq!(category, taxonomy.classify(title, summary));
        }
    }

    #[test]
    fn test_custom_taxonomy_validation() {
        let ok = Taxonomy::new(
            "weather",
            labels(&["Sunny", "Rainy"]),
            vec![ClassificationRule::new("Rainy", &["storm", "RAIN"])],
            "Sunny",
        )
        .unwrap();
        assert_eq!(ok.classify("Heavy rain expected", ""), "Rainy");
        assert_eq!(ok.classify("Clear skies", ""), "Sunny");

        assert!(Taxonomy::new("bad", labels(&["A"]), vec![], "B").is_err());
        assert!(Taxonomy::new(
            "bad",
            labels(&["A"]),
            vec![ClassificationRule::new("C", &["x"])],
            "A"
        )
        .is_err());
        assert!(Taxonomy::new("bad", labels(&["All", "A"]), vec![], "A").is_err());
    }

    #[test]
    fn test_canonical_and_filter_options() {
        let taxonomy = Taxonomy::topics();
        assert_eq!(taxonomy.canonical("open source"), Some("Open Source"));
        assert_eq!(taxonomy.canonical("Healthcare"), None);
        let options = taxonomy.filter_options();
        assert_eq!(options[0], ALL_CATEGORIES);
        assert_eq!(options.len(), 7);
    }

    #[test]
    fn test_taxonomy_kind_parsing() {
        assert_eq!("Industries".parse::<TaxonomyKind>(), Ok(TaxonomyKind::Industries));
        assert_eq!("topic".parse::<TaxonomyKind>(), Ok(TaxonomyKind::Topics));
        assert!("colors".parse::<TaxonomyKind>().is_err());
    }
}
