//! End-to-end routing flows: keyword classification → client matching →
//! engine dispatch with mock collaborators.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use inbox_router::classify::{Category, KeywordClassifier};
use inbox_router::client::{Client, ClientMatcher};
use inbox_router::config::RouterConfig;
use inbox_router::error::{ForwardError, TrackerError};
use inbox_router::message::Message;
use inbox_router::routing::{
    IssueOutcome, IssueRequest, IssueTracker, MessageForwarder, RoutingAction, RoutingEngine,
};

/// Tracker handing out sequential issue numbers.
#[derive(Default)]
struct InMemoryTracker {
    created: Mutex<Vec<IssueRequest>>,
}

#[async_trait]
impl IssueTracker for InMemoryTracker {
    async fn create_issue(&self, request: IssueRequest) -> Result<IssueOutcome, TrackerError> {
        let mut created = self.created.lock().unwrap();
        let number = created.len() as u64 + 1;
        let url = format!("https://github.com/{}/issues/{}", request.repository, number);
        created.push(request);
        Ok(IssueOutcome::created(number, url))
    }
}

#[derive(Default)]
struct InMemoryForwarder {
    forwarded: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl MessageForwarder for InMemoryForwarder {
    async fn forward(
        &self,
        message: &Message,
        destination: &str,
    ) -> Result<bool, ForwardError> {
        self.forwarded
            .lock()
            .unwrap()
            .push((message.id.clone(), destination.to_string()));
        Ok(true)
    }
}

fn acme() -> Client {
    Client {
        name: "Acme Corporation".into(),
        domains: vec!["acmecorp.com".into()],
        signature_patterns: vec!["Acme Corp".into()],
        authorized_addresses: vec!["ceo@acmecorp.com".into()],
        issue_repository: Some("acme/support".into()),
        technical_contact: None,
        commercial_contact: Some("sales@internal.example".into()),
        administrative_contact: Some("admin@internal.example".into()),
    }
}

fn message(sender: &str, subject: &str, body: &str) -> Message {
    Message {
        id: format!("<{}@test>", subject.replace(' ', "-").to_lowercase()),
        sender: sender.into(),
        recipient: "inbox@router.example".into(),
        subject: subject.into(),
        body: body.into(),
        attachments: vec![],
        received_at: Utc::now(),
    }
}

/// Route engine logs through the test harness (RUST_LOG to adjust).
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

fn engine(
    tracker: Arc<InMemoryTracker>,
    forwarder: Arc<InMemoryForwarder>,
) -> RoutingEngine {
    init_tracing();
    RoutingEngine::new(
        Arc::new(KeywordClassifier::new()),
        tracker,
        forwarder,
        RouterConfig::default(),
    )
}

#[tokio::test]
async fn technical_email_becomes_tracked_issue() {
    let tracker = Arc::new(InMemoryTracker::default());
    let forwarder = Arc::new(InMemoryForwarder::default());
    let engine = engine(Arc::clone(&tracker), Arc::clone(&forwarder));

    let matcher = ClientMatcher::new();
    let clients = [acme()];
    let msg = message(
        "dev@acmecorp.com",
        "Broken endpoint",
        "I'm getting a 500 error on the API endpoint, please fix this bug",
    );

    let client = matcher.identify(&msg, &clients).expect("client resolved");
    let decision = engine.process(&msg, client).await;

    assert!(decision.success);
    assert_eq!(decision.action, RoutingAction::CreateIssue);
    assert_eq!(decision.category, Category::Technical);
    assert!(decision.confidence > 0.5);
    assert_eq!(decision.destination.as_deref(), Some("acme/support"));
    assert_eq!(
        decision.reference.as_deref(),
        Some("https://github.com/acme/support/issues/1")
    );

    let created = tracker.created.lock().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].title, "[Acme Corporation] Broken endpoint");
    assert!(forwarder.forwarded.lock().unwrap().is_empty());
}

#[tokio::test]
async fn commercial_email_forwarded_to_sales() {
    let tracker = Arc::new(InMemoryTracker::default());
    let forwarder = Arc::new(InMemoryForwarder::default());
    let engine = engine(Arc::clone(&tracker), Arc::clone(&forwarder));

    let msg = message(
        "buyer@acmecorp.com",
        "Premium plan",
        "We'd like pricing for the Premium plan upgrade",
    );
    let decision = engine.process(&msg, &acme()).await;

    assert!(decision.success);
    assert_eq!(decision.action, RoutingAction::ForwardMessage);
    assert_eq!(decision.category, Category::Commercial);
    assert_eq!(decision.destination.as_deref(), Some("sales@internal.example"));
    assert_eq!(
        forwarder.forwarded.lock().unwrap()[0].1,
        "sales@internal.example"
    );
    assert!(tracker.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn ambiguous_email_deferred_then_manually_routed() {
    let tracker = Arc::new(InMemoryTracker::default());
    let forwarder = Arc::new(InMemoryForwarder::default());
    let engine = engine(Arc::clone(&tracker), Arc::clone(&forwarder));

    // No keyword hits at all — keyword classifier falls back to
    // (administrative, 0.5), below the 0.7 threshold.
    let msg = message("someone@acmecorp.com", "hello", "just checking in");
    let deferred = engine.process(&msg, &acme()).await;
    assert!(deferred.success);
    assert_eq!(deferred.action, RoutingAction::ManualReview);
    assert_eq!(deferred.category, Category::Administrative);

    // A human reviews it and routes it as technical.
    let routed = engine.route_manual(&msg, &acme(), Category::Technical).await;
    assert!(routed.success);
    assert_eq!(routed.action, RoutingAction::CreateIssue);
    assert_eq!(tracker.created.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn technical_without_repository_is_error_decision() {
    let tracker = Arc::new(InMemoryTracker::default());
    let forwarder = Arc::new(InMemoryForwarder::default());
    let engine = engine(tracker, forwarder);

    let mut client = acme();
    client.issue_repository = None;
    let msg = message(
        "dev@acmecorp.com",
        "Bug",
        "server crash, error in the database query",
    );
    let decision = engine.process(&msg, &client).await;

    assert!(!decision.success);
    assert_eq!(decision.action, RoutingAction::Error);
    assert!(!decision.message.is_empty());
}

#[tokio::test]
async fn unmatched_sender_resolves_no_client() {
    init_tracing();
    let matcher = ClientMatcher::new();
    let clients = [acme()];
    let msg = message("stranger@unknown.net", "hi", "nothing identifying here");
    assert!(matcher.identify(&msg, &clients).is_none());
}

#[tokio::test]
async fn identical_inputs_are_idempotent() {
    let tracker = Arc::new(InMemoryTracker::default());
    let forwarder = Arc::new(InMemoryForwarder::default());
    let engine = engine(tracker, forwarder);

    let msg = message(
        "buyer@acmecorp.com",
        "Premium plan",
        "We'd like pricing for the Premium plan upgrade",
    );
    let first = engine.process(&msg, &acme()).await;
    let second = engine.process(&msg, &acme()).await;
    assert_eq!(first, second);
}
