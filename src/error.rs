//! Error types for Inbox Router.

use crate::classify::Category;

/// Top-level error type for the router core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Issue tracker error: {0}")]
    Tracker(#[from] TrackerError),

    #[error("Forwarder error: {0}")]
    Forward(#[from] ForwardError),

    #[error("Message error: {0}")]
    Message(#[from] MessageError),
}

/// Failures from the external text-classification service.
///
/// The remote classifier converts all of these into the fail-open default
/// result; they never cross the `Classifier` trait boundary.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Classification service request failed: {0}")]
    RequestFailed(String),

    #[error("Classification service timed out")]
    Timeout,

    #[error("Invalid response from classification service: {0}")]
    InvalidResponse(String),
}

/// Failures from the client directory collaborator.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Failed to list clients: {0}")]
    ListFailed(String),

    #[error("Client directory unavailable: {0}")]
    Unavailable(String),
}

/// Failures from the issue tracker collaborator.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Issue tracker request failed: {0}")]
    RequestFailed(String),

    #[error("Issue tracker returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Repository not found: {0}")]
    RepositoryNotFound(String),
}

/// Failures from the message forwarder collaborator.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("Failed to send to {destination}: {reason}")]
    SendFailed { destination: String, reason: String },

    #[error("Invalid destination address: {0}")]
    InvalidDestination(String),
}

/// Failures raised while parsing a raw message.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("Could not parse raw message")]
    Unparseable,
}

/// Internal routing failures.
///
/// These never escape the engine: `RoutingEngine` converts each into a
/// `RoutingDecision` with `action = error` at the call site that produced it.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error("No issue repository configured for client {client}")]
    MissingRepository { client: String },

    #[error("No {category} contact configured for client {client}")]
    MissingContact { client: String, category: Category },

    #[error("Failed to create issue: {0}")]
    IssueCreation(String),

    #[error("Failed to forward message to {destination}")]
    ForwardRejected { destination: String },

    #[error("Failed to forward message to {destination}: {reason}")]
    ForwardFailed { destination: String, reason: String },
}

/// Result type alias for the router core.
pub type Result<T> = std::result::Result<T, Error>;
