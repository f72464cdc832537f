//! Routing decision engine.
//!
//! Per-call state machine: Received → Classified → {ManualReview |
//! RoutedSuccess | RoutedError}. The engine holds no mutable state across
//! calls and never returns an error — every internal failure is converted
//! into a `RoutingDecision` with `action = error` at the call site that
//! produced it. Collaborator failures are terminal for that message; the
//! engine does not retry.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::classify::{Category, Classifier};
use crate::client::Client;
use crate::config::RouterConfig;
use crate::error::RoutingError;
use crate::message::Message;
use crate::routing::issue::format_issue;
use crate::routing::types::{
    IssueRequest, IssueTracker, MessageForwarder, RoutingAction, RoutingDecision,
};

/// Composes the classifier, per-client routing configuration, and the
/// side-effecting collaborators into a single routing decision per message.
pub struct RoutingEngine {
    classifier: Arc<dyn Classifier>,
    tracker: Arc<dyn IssueTracker>,
    forwarder: Arc<dyn MessageForwarder>,
    config: RouterConfig,
}

impl RoutingEngine {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        tracker: Arc<dyn IssueTracker>,
        forwarder: Arc<dyn MessageForwarder>,
        config: RouterConfig,
    ) -> Self {
        Self {
            classifier,
            tracker,
            forwarder,
            config,
        }
    }

    /// Classify a message and route it for the resolved client.
    ///
    /// Confidence below the configured threshold defers to manual review —
    /// a deliberate non-failure terminal, awaiting [`Self::route_manual`].
    pub async fn process(&self, message: &Message, client: &Client) -> RoutingDecision {
        let result = self.classifier.classify(&message.body).await;
        info!(
            id = %message.id,
            client = %client.name,
            category = %result.category,
            confidence = result.confidence,
            classifier = self.classifier.name(),
            "Classified message"
        );

        if result.confidence < self.config.confidence_threshold {
            info!(
                id = %message.id,
                confidence = result.confidence,
                threshold = self.config.confidence_threshold,
                "Below confidence threshold, deferring to manual review"
            );
            return RoutingDecision::manual_review(result.category, result.confidence);
        }

        self.dispatch(message, client, result.category, result.confidence)
            .await
    }

    /// Manual-override entry point: route with a human-supplied category,
    /// skipping the confidence gate. This is how a previously deferred
    /// message is finally routed after review.
    pub async fn route_manual(
        &self,
        message: &Message,
        client: &Client,
        category: Category,
    ) -> RoutingDecision {
        info!(
            id = %message.id,
            client = %client.name,
            category = %category,
            "Routing with manually assigned category"
        );
        // A human decided — report full confidence on the decision record.
        self.dispatch(message, client, category, 1.0).await
    }

    /// Dispatch on category. The closed `Category` enum makes an unknown
    /// classification unrepresentable here.
    async fn dispatch(
        &self,
        message: &Message,
        client: &Client,
        category: Category,
        confidence: f32,
    ) -> RoutingDecision {
        match category {
            Category::Technical => self.create_issue(message, client, confidence).await,
            Category::Commercial | Category::Administrative => {
                self.forward(message, client, category, confidence).await
            }
        }
    }

    /// Technical route: create an issue in the client's repository.
    async fn create_issue(
        &self,
        message: &Message,
        client: &Client,
        confidence: f32,
    ) -> RoutingDecision {
        let category = Category::Technical;

        let Some(repository) = client
            .issue_repository
            .as_deref()
            .filter(|r| !r.is_empty())
        else {
            warn!(client = %client.name, "No issue repository configured");
            let err = RoutingError::MissingRepository {
                client: client.name.clone(),
            };
            return RoutingDecision::error(category, confidence, err.to_string());
        };

        let content = format_issue(message, &client.name);
        let request = IssueRequest {
            title: content.title,
            body: content.body,
            repository: repository.to_string(),
            labels: self.config.issue_labels.clone(),
        };

        match self.tracker.create_issue(request).await {
            Ok(outcome) if outcome.success => {
                let reference = outcome
                    .url
                    .clone()
                    .or_else(|| outcome.number.map(|n| n.to_string()));
                let number = outcome
                    .number
                    .map(|n| format!("#{n}"))
                    .unwrap_or_else(|| "issue".into());
                info!(
                    id = %message.id,
                    repository,
                    reference = reference.as_deref().unwrap_or(""),
                    "Created issue"
                );
                RoutingDecision::routed(
                    RoutingAction::CreateIssue,
                    category,
                    confidence,
                    repository,
                    reference,
                    format!("Created issue {number} in {repository}"),
                )
            }
            Ok(outcome) => {
                let reason = outcome.error.unwrap_or_else(|| "unknown tracker failure".into());
                error!(id = %message.id, repository, reason = %reason, "Issue tracker rejected request");
                let err = RoutingError::IssueCreation(reason);
                RoutingDecision::error(category, confidence, err.to_string())
            }
            Err(e) => {
                error!(id = %message.id, repository, error = %e, "Issue tracker call failed");
                let err = RoutingError::IssueCreation(e.to_string());
                RoutingDecision::error(category, confidence, err.to_string())
            }
        }
    }

    /// Commercial / administrative route: forward to the category contact.
    async fn forward(
        &self,
        message: &Message,
        client: &Client,
        category: Category,
        confidence: f32,
    ) -> RoutingDecision {
        let Some(contact) = client.contact_for(category) else {
            warn!(client = %client.name, %category, "No contact configured");
            let err = RoutingError::MissingContact {
                client: client.name.clone(),
                category,
            };
            return RoutingDecision::error(category, confidence, err.to_string());
        };

        match self.forwarder.forward(message, contact).await {
            Ok(true) => {
                info!(id = %message.id, destination = contact, "Forwarded message");
                RoutingDecision::routed(
                    RoutingAction::ForwardMessage,
                    category,
                    confidence,
                    contact,
                    None,
                    format!("Forwarded message to {category} contact: {contact}"),
                )
            }
            Ok(false) => {
                error!(id = %message.id, destination = contact, "Forwarder declined message");
                let err = RoutingError::ForwardRejected {
                    destination: contact.to_string(),
                };
                RoutingDecision::error(category, confidence, err.to_string())
            }
            Err(e) => {
                error!(id = %message.id, destination = contact, error = %e, "Forwarder call failed");
                let err = RoutingError::ForwardFailed {
                    destination: contact.to_string(),
                    reason: e.to_string(),
                };
                RoutingDecision::error(category, confidence, err.to_string())
            }
        }
    }
}
