//! Routing decision engine and its collaborator contracts.
//!
//! Control flow per message:
//! 1. caller resolves the client (`ClientMatcher` + directory)
//! 2. `RoutingEngine::process()` classifies and gates on confidence
//! 3. category dispatch: technical → issue tracker, commercial /
//!    administrative → message forwarder
//! 4. the returned `RoutingDecision` is persisted/logged by the caller
//!
//! Deferred messages re-enter through `RoutingEngine::route_manual()` once
//! a human supplies the category.

pub mod engine;
pub mod issue;
pub mod types;

pub use engine::RoutingEngine;
pub use issue::{IssueContent, format_issue};
pub use types::{
    IssueOutcome, IssueRequest, IssueTracker, MessageForwarder, RoutingAction, RoutingDecision,
};
