//! Configuration types.

/// Which classifier implementation to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierBackend {
    /// Deterministic keyword scoring — no external calls.
    Keyword,
    /// Delegate to an external text-classification service.
    Remote,
}

/// Router configuration.
///
/// Constructed once by the caller and passed into component constructors.
/// There is no global or import-time configuration state.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Minimum classification confidence to route automatically.
    /// Anything below this is deferred to manual review.
    pub confidence_threshold: f32,
    /// Labels applied to every created issue.
    pub issue_labels: Vec<String>,
    /// Maximum number of characters sent to the remote classifier.
    pub max_classify_chars: usize,
    /// Which classifier implementation to use.
    pub backend: ClassifierBackend,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.7,
            issue_labels: vec!["client-email".to_string(), "auto-generated".to_string()],
            max_classify_chars: 1000,
            backend: ClassifierBackend::Keyword,
        }
    }
}
