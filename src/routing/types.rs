//! Routing decision types and the side-effect collaborator traits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::classify::Category;
use crate::error::{ForwardError, TrackerError};
use crate::message::Message;

/// What the engine decided to do with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingAction {
    /// An issue was created in the client's repository.
    CreateIssue,
    /// The message was forwarded to a contact address.
    ForwardMessage,
    /// Confidence below threshold — deferred to a human. Not a failure.
    ManualReview,
    /// Routing failed; `message` carries the reason.
    Error,
}

impl RoutingAction {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CreateIssue => "create_issue",
            Self::ForwardMessage => "forward_message",
            Self::ManualReview => "manual_review",
            Self::Error => "error",
        }
    }
}

/// The outcome of one `process` call. Immutable; callers persist it.
///
/// Invariants: `ManualReview` decisions always have `success = true`;
/// `Error` decisions always have `success = false` and a non-empty `message`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub success: bool,
    pub action: RoutingAction,
    pub category: Category,
    pub confidence: f32,
    /// Repository or contact address the message was routed to.
    pub destination: Option<String>,
    /// Created-issue URL or similar collaborator reference.
    pub reference: Option<String>,
    /// Human-readable explanation.
    pub message: String,
}

impl RoutingDecision {
    /// Deliberate deferred outcome — the system defers, it does not err.
    pub fn manual_review(category: Category, confidence: f32) -> Self {
        Self {
            success: true,
            action: RoutingAction::ManualReview,
            category,
            confidence,
            destination: None,
            reference: None,
            message: "Message flagged for manual review due to low confidence".into(),
        }
    }

    /// Successful routed outcome.
    pub fn routed(
        action: RoutingAction,
        category: Category,
        confidence: f32,
        destination: impl Into<String>,
        reference: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            action,
            category,
            confidence,
            destination: Some(destination.into()),
            reference,
            message: message.into(),
        }
    }

    /// Failed outcome carrying the failure description.
    pub fn error(category: Category, confidence: f32, message: impl Into<String>) -> Self {
        Self {
            success: false,
            action: RoutingAction::Error,
            category,
            confidence,
            destination: None,
            reference: None,
            message: message.into(),
        }
    }
}

/// A request to create one tracked issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueRequest {
    pub title: String,
    pub body: String,
    /// Repository identifier, e.g. "owner/repo".
    pub repository: String,
    pub labels: Vec<String>,
}

/// Structured result from the issue tracker collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueOutcome {
    pub success: bool,
    pub number: Option<u64>,
    pub url: Option<String>,
    pub error: Option<String>,
    pub status_code: Option<u16>,
}

impl IssueOutcome {
    pub fn created(number: u64, url: impl Into<String>) -> Self {
        Self {
            success: true,
            number: Some(number),
            url: Some(url.into()),
            error: None,
            status_code: None,
        }
    }

    pub fn failed(error: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            success: false,
            number: None,
            url: None,
            error: Some(error.into()),
            status_code,
        }
    }
}

/// Issue tracker collaborator — performs the actual issue creation.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    async fn create_issue(&self, request: IssueRequest) -> Result<IssueOutcome, TrackerError>;
}

/// Message forwarder collaborator — relays a message to a contact address.
///
/// `Ok(false)` means the forwarder ran but declined/failed without detail;
/// `Err` carries a structured failure.
#[async_trait]
pub trait MessageForwarder: Send + Sync {
    async fn forward(&self, message: &Message, destination: &str) -> Result<bool, ForwardError>;
}
