//! Inbox Router — classification and routing core for a shared client inbox.
//!
//! Given an inbound message and a directory of known clients, the core
//! identifies the owning client, classifies the message intent
//! (technical / commercial / administrative), and decides a routing action:
//! create a tracked issue, forward to a contact, or defer to manual review
//! when classification confidence is below the configured threshold.
//!
//! Transport, issue-tracker APIs, and persistence are external collaborators
//! reached through the traits in [`classify`], [`client`], and [`routing`].

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod message;
pub mod routing;
