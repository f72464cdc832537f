//! Keyword-scoring classifier.
//!
//! Counts per-category indicator words in the lower-cased text and picks
//! the category with the most hits; confidence is that category's share of
//! all hits. Matching is by substring, so a short keyword inside a longer
//! word counts (e.g. "bug" inside "debugger") — this mirrors the behavior
//! the routing thresholds were tuned against.

use tracing::debug;

use crate::classify::{Category, ClassificationResult, Classifier};

/// Indicator words per category.
const TECHNICAL_KEYWORDS: &[&str] = &[
    "bug", "error", "issue", "problem", "crash", "fix", "feature", "request", "update", "upgrade",
    "install", "configuration", "setup", "deploy", "code", "api", "endpoint", "server", "database",
    "query", "exception", "log", "debug",
];

const COMMERCIAL_KEYWORDS: &[&str] = &[
    "price", "cost", "quote", "purchase", "buy", "order", "invoice", "payment", "subscription",
    "license", "contract", "agreement", "proposal", "offer", "discount", "sale", "pricing", "plan",
    "package", "trial", "demo", "sales", "billing",
];

const ADMINISTRATIVE_KEYWORDS: &[&str] = &[
    "account", "login", "password", "access", "permission", "user", "profile", "settings",
    "preference", "schedule", "meeting", "appointment", "call", "contact", "support", "help",
    "assistance", "information", "question", "inquiry", "feedback", "suggestion",
];

/// Deterministic keyword-based classifier. No external calls, no state.
#[derive(Debug, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    fn keywords_for(category: Category) -> &'static [&'static str] {
        match category {
            Category::Technical => TECHNICAL_KEYWORDS,
            Category::Commercial => COMMERCIAL_KEYWORDS,
            Category::Administrative => ADMINISTRATIVE_KEYWORDS,
        }
    }

    /// Non-overlapping substring occurrences of each keyword in `text`.
    fn score(text: &str, keywords: &[&str]) -> usize {
        keywords.iter().map(|kw| text.matches(kw).count()).sum()
    }
}

#[async_trait::async_trait]
impl Classifier for KeywordClassifier {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn classify(&self, text: &str) -> ClassificationResult {
        let lowered = text.to_lowercase();

        let mut best = Category::Administrative;
        let mut best_count = 0usize;
        let mut total = 0usize;

        // Iteration order doubles as the tie-break: ties resolve to the
        // earliest category in Category::ALL (technical > commercial >
        // administrative), so a strict `>` keeps the first maximum.
        for category in Category::ALL {
            let count = Self::score(&lowered, Self::keywords_for(category));
            total += count;
            if count > best_count {
                best = category;
                best_count = count;
            }
        }

        if total == 0 {
            return ClassificationResult::fallback();
        }

        let confidence = best_count as f32 / total as f32;
        debug!(
            category = %best,
            confidence,
            matches = best_count,
            total,
            "Keyword classification"
        );
        ClassificationResult {
            category: best,
            confidence,
        }
    }
}
