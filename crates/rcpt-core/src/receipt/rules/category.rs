//! Keyword-based expense categorization.

use tracing::debug;

use super::{KeywordSet, NormalizedText};
use crate::models::config::CategoryRule;
use crate::models::receipt::Category;

/// Ordered keyword rules mapping receipt text to a category.
///
/// Rules are tested against the whole text, not line by line, in the order
/// given. The first rule with a matching keyword wins; no match is `Other`.
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    rules: Vec<(Category, KeywordSet)>,
}

impl CategoryClassifier {
    /// Create a classifier with the built-in rules.
    pub fn new() -> Self {
        Self::from_rules(&CategoryRule::defaults())
    }

    /// Create a classifier from configured rules.
    ///
    /// Rules for `Other` are ignored; it is only ever the fallback.
    pub fn from_rules(rules: &[CategoryRule]) -> Self {
        let rules = rules
            .iter()
            .filter(|r| r.category != Category::Other)
            .map(|r| (r.category, KeywordSet::new(&r.keywords)))
            .collect();

        Self { rules }
    }

    /// Categorize normalized receipt text.
    pub fn classify(&self, text: &NormalizedText) -> Category {
        self.classify_str(&text.joined())
    }

    /// Categorize arbitrary text.
    pub fn classify_str(&self, text: &str) -> Category {
        let lower = text.to_lowercase();

        for (category, keywords) in &self.rules {
            if let Some(keyword) = keywords.find_lowercase(&lower) {
                debug!("Category {} (keyword {:?})", category, keyword);
                return *category;
            }
        }

        Category::Other
    }
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new()
    }
}
