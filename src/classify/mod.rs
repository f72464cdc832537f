//! Message intent classification.
//!
//! Two interchangeable implementations behind the [`Classifier`] trait:
//! - [`KeywordClassifier`] — deterministic keyword scoring, no external calls
//! - [`RemoteClassifier`] — delegates to an external text-classification
//!   service and parses its `"<category>,<confidence>"` response
//!
//! Both are infallible by contract: classification failures fail open to
//! `(administrative, 0.5)`, they never surface as errors.

pub mod keyword;
pub mod remote;

pub use keyword::KeywordClassifier;
pub use remote::RemoteClassifier;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{ClassifierBackend, RouterConfig};
use crate::error::ClassifierError;

/// Message intent category. Closed set — nothing else flows downstream
/// of classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Bug reports, outages, feature requests.
    Technical,
    /// Sales, pricing, contract discussions.
    Commercial,
    /// Account management, scheduling, general inquiries.
    Administrative,
}

impl Category {
    /// All categories in tie-break priority order.
    pub const ALL: [Category; 3] = [
        Category::Technical,
        Category::Commercial,
        Category::Administrative,
    ];

    /// Lower-case label for logging and wire parsing.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Commercial => "commercial",
            Self::Administrative => "administrative",
        }
    }

    /// Parse a lower-cased token. Anything outside the closed set is `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "technical" => Some(Self::Technical),
            "commercial" => Some(Self::Commercial),
            "administrative" => Some(Self::Administrative),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single classification call. Produced fresh per call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    /// Always in [0.0, 1.0].
    pub confidence: f32,
}

impl ClassificationResult {
    /// The defined default when no signal exists or classification fails.
    pub fn fallback() -> Self {
        Self {
            category: Category::Administrative,
            confidence: 0.5,
        }
    }
}

/// Classification seam consumed by the routing engine.
///
/// Implementations never fail — they always return a valid result.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Implementation name for logging.
    fn name(&self) -> &str;

    /// Classify message text into a category with a confidence score.
    async fn classify(&self, text: &str) -> ClassificationResult;
}

/// External text-classification collaborator.
///
/// The only wire format the core owns is interpreting the returned string
/// as `"<category>,<confidence>"`.
#[async_trait]
pub trait TextClassifierService: Send + Sync {
    /// Send text to the service and return its raw single-line response.
    async fn request(&self, text: &str) -> Result<String, ClassifierError>;
}

/// Create a classifier from configuration.
///
/// `ClassifierBackend::Remote` requires a service collaborator; without one
/// the factory falls back to the keyword classifier.
pub fn create_classifier(
    config: &RouterConfig,
    service: Option<Arc<dyn TextClassifierService>>,
) -> Arc<dyn Classifier> {
    match (config.backend, service) {
        (ClassifierBackend::Remote, Some(service)) => {
            Arc::new(RemoteClassifier::new(service, config.max_classify_chars))
        }
        (ClassifierBackend::Remote, None) => {
            warn!("Remote classifier configured without a service, using keyword classifier");
            Arc::new(KeywordClassifier::new())
        }
        (ClassifierBackend::Keyword, _) => Arc::new(KeywordClassifier::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_tokens_round_trip() {
        for cat in Category::ALL {
            assert_eq!(Category::from_token(cat.as_str()), Some(cat));
        }
    }

    #[test]
    fn category_rejects_unknown_token() {
        assert!(Category::from_token("spam").is_none());
        assert!(Category::from_token("").is_none());
        assert!(Category::from_token("Technical").is_none()); // not lower-cased
    }

    #[test]
    fn category_serializes_snake_case() {
        let json = serde_json::to_value(Category::Administrative).unwrap();
        assert_eq!(json, "administrative");
    }

    #[test]
    fn fallback_is_administrative_half() {
        let result = ClassificationResult::fallback();
        assert_eq!(result.category, Category::Administrative);
        assert!((result.confidence - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn factory_defaults_to_keyword() {
        let classifier = create_classifier(&RouterConfig::default(), None);
        assert_eq!(classifier.name(), "keyword");
    }

    #[test]
    fn factory_remote_without_service_falls_back() {
        let config = RouterConfig {
            backend: ClassifierBackend::Remote,
            ..Default::default()
        };
        let classifier = create_classifier(&config, None);
        assert_eq!(classifier.name(), "keyword");
    }
}
