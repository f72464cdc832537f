//! Remote classifier — delegates to an external text-classification service.
//!
//! The service receives the message text (truncated) and is expected to
//! answer with a single line of the form `"<category>,<confidence>"`, e.g.
//! `"technical,0.85"`. Every deviation from that contract fails open to the
//! default result — the classifier never errors.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::classify::{Category, ClassificationResult, Classifier, TextClassifierService};

/// Classifier backed by an external text-classification service.
pub struct RemoteClassifier {
    service: Arc<dyn TextClassifierService>,
    max_chars: usize,
}

impl RemoteClassifier {
    pub fn new(service: Arc<dyn TextClassifierService>, max_chars: usize) -> Self {
        Self { service, max_chars }
    }
}

#[async_trait::async_trait]
impl Classifier for RemoteClassifier {
    fn name(&self) -> &str {
        "remote"
    }

    async fn classify(&self, text: &str) -> ClassificationResult {
        let truncated: String = text.chars().take(self.max_chars).collect();

        let raw = match self.service.request(&truncated).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Classification service call failed, using fallback");
                return ClassificationResult::fallback();
            }
        };

        let result = parse_response(&raw);
        debug!(
            category = %result.category,
            confidence = result.confidence,
            "Remote classification"
        );
        result
    }
}

/// Parse a `"<category>,<confidence>"` service response.
///
/// - not exactly two comma-separated fields → fallback
/// - unknown category token → fallback (logged)
/// - unparseable confidence → 0.5
/// - confidence outside [0,1] → clamped
fn parse_response(raw: &str) -> ClassificationResult {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 2 {
        warn!(response = %raw, "Unexpected classification response format");
        return ClassificationResult::fallback();
    }

    let token = parts[0].trim().to_lowercase();
    let Some(category) = Category::from_token(&token) else {
        warn!(token = %token, "Invalid category from classification service");
        return ClassificationResult::fallback();
    };

    let confidence = parts[1]
        .trim()
        .parse::<f32>()
        .unwrap_or(0.5)
        .clamp(0.0, 1.0);

    ClassificationResult {
        category,
        confidence,
    }
}
