//! Client directory types and client identification.

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classify::Category;
use crate::error::{DirectoryError, Result};
use crate::message::Message;

/// A known client and its routing destinations.
///
/// A client with no destination configured for a category is valid, but
/// routing a message of that category fails at decision time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    /// Sender domains owned by this client.
    pub domains: Vec<String>,
    /// Regex patterns recognizing this client's signature in a message body.
    pub signature_patterns: Vec<String>,
    /// Individual sender addresses authorized for this client.
    pub authorized_addresses: Vec<String>,
    /// Repository receiving issues for technical messages ("owner/repo").
    pub issue_repository: Option<String>,
    /// Contact for technical matters outside the issue flow.
    pub technical_contact: Option<String>,
    /// Contact receiving forwarded commercial messages.
    pub commercial_contact: Option<String>,
    /// Contact receiving forwarded administrative messages.
    pub administrative_contact: Option<String>,
}

impl Client {
    /// Forwarding contact for a category, if configured and non-empty.
    pub fn contact_for(&self, category: Category) -> Option<&str> {
        let contact = match category {
            Category::Technical => self.technical_contact.as_deref(),
            Category::Commercial => self.commercial_contact.as_deref(),
            Category::Administrative => self.administrative_contact.as_deref(),
        };
        contact.filter(|c| !c.is_empty())
    }
}

/// Source of truth for known clients. Ordering defines match precedence.
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    /// List all clients, in precedence order.
    async fn list(&self) -> std::result::Result<Vec<Client>, DirectoryError>;
}

/// Matches inbound messages to clients.
///
/// Scans clients in directory order; per client it checks, in sequence,
/// sender domain, full sender address, then signature patterns against the
/// body. The first client with any hit wins. O(clients × patterns) — fine
/// for modest directory sizes.
#[derive(Debug, Default)]
pub struct ClientMatcher;

impl ClientMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Find the owning client for a message, or `None` if nothing matches.
    pub fn identify<'a>(&self, message: &Message, clients: &'a [Client]) -> Option<&'a Client> {
        let sender = message.sender.to_lowercase();
        let domain = message.sender_domain();

        for client in clients {
            if let Some(ref domain) = domain
                && client.domains.iter().any(|d| d.to_lowercase() == *domain)
            {
                debug!(client = %client.name, %domain, "Client matched by domain");
                return Some(client);
            }

            if client
                .authorized_addresses
                .iter()
                .any(|a| a.to_lowercase() == sender)
            {
                debug!(client = %client.name, sender = %message.sender, "Client matched by authorized address");
                return Some(client);
            }

            if self.matches_signature(client, &message.body) {
                debug!(client = %client.name, "Client matched by signature pattern");
                return Some(client);
            }
        }

        None
    }

    /// List the directory, then identify. Convenience for callers holding
    /// only the directory collaborator.
    pub async fn identify_from_directory(
        &self,
        message: &Message,
        directory: &dyn ClientDirectory,
    ) -> Result<Option<Client>> {
        let clients = directory.list().await?;
        Ok(self.identify(message, &clients).cloned())
    }

    /// Whether any of the client's signature patterns matches the body.
    /// An invalid pattern is logged and treated as a non-match. Empty
    /// bodies never match — a pattern like `.*` must not claim every
    /// bodyless message.
    fn matches_signature(&self, client: &Client, body: &str) -> bool {
        if body.is_empty() {
            return false;
        }
        client.signature_patterns.iter().any(|pattern| {
            match Regex::new(pattern) {
                Ok(re) => re.is_match(body),
                Err(e) => {
                    warn!(client = %client.name, pattern = %pattern, error = %e, "Invalid signature pattern");
                    false
                }
            }
        })
    }
}
