//! Inbound message type and raw RFC 822 parsing.

use chrono::{DateTime, Utc};
use mail_parser::{MessageParser, MimeHeaders};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::MessageError;

/// An inbound message, immutable once received.
///
/// Channel adapters (IMAP poller, mail API webhook) build this either
/// directly or via [`Message::parse`] from raw RFC 822 bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier (Message-ID header or generated UUID).
    pub id: String,
    /// Sender address.
    pub sender: String,
    /// Recipient address (the shared inbox).
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Body text.
    pub body: String,
    /// Attachment filenames, in message order.
    pub attachments: Vec<String>,
    /// When the message was received.
    pub received_at: DateTime<Utc>,
}

impl Message {
    /// Parse a raw RFC 822 email into a `Message`.
    ///
    /// Plain-text body is preferred; HTML is stripped to text as a fallback.
    /// A missing Message-ID is replaced with a generated UUID.
    pub fn parse(raw: &[u8]) -> Result<Self, MessageError> {
        let parsed = MessageParser::default()
            .parse(raw)
            .ok_or(MessageError::Unparseable)?;

        let id = parsed
            .message_id()
            .map(|s| s.to_string())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let sender = first_address(parsed.from());
        let recipient = first_address(parsed.to());
        let subject = parsed.subject().unwrap_or_default().to_string();

        let body = if let Some(text) = parsed.body_text(0) {
            text.to_string()
        } else if let Some(html) = parsed.body_html(0) {
            strip_html(html.as_ref())
        } else {
            String::new()
        };

        let attachments = parsed
            .attachments()
            .filter_map(|part| part.attachment_name().map(|n| n.to_string()))
            .collect();

        let received_at = parsed
            .date()
            .map(|d| {
                DateTime::from_timestamp(d.to_timestamp(), 0).unwrap_or_else(Utc::now)
            })
            .unwrap_or_else(Utc::now);

        Ok(Self {
            id,
            sender,
            recipient,
            subject,
            body,
            attachments,
            received_at,
        })
    }

    /// Domain portion of the sender address: the substring after the last
    /// `@`, lower-cased. `None` when the sender contains no `@`.
    pub fn sender_domain(&self) -> Option<String> {
        self.sender
            .rsplit_once('@')
            .map(|(_, domain)| domain.to_lowercase())
    }
}

/// First address from an optional mail_parser Address field.
fn first_address(addr: Option<&mail_parser::Address>) -> String {
    addr.and_then(|a| a.first())
        .and_then(|a| a.address())
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// Strip HTML tags, collapsing whitespace.
fn strip_html(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(ch),
            _ => {}
        }
    }
    result.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &[u8] = b"Message-ID: <test123@example.com>\r\n\
From: Alice <client@acmecorp.com>\r\n\
To: inbox@router.example\r\n\
Subject: API outage\r\n\
Date: Mon, 12 Jan 2026 10:00:00 +0000\r\n\
Content-Type: text/plain\r\n\
\r\n\
The API endpoint is returning 500 errors.\r\n";

    #[test]
    fn parse_plain_text_email() {
        let msg = Message::parse(RAW).unwrap();
        assert_eq!(msg.id, "test123@example.com");
        assert_eq!(msg.sender, "client@acmecorp.com");
        assert_eq!(msg.recipient, "inbox@router.example");
        assert_eq!(msg.subject, "API outage");
        assert!(msg.body.contains("500 errors"));
        assert!(msg.attachments.is_empty());
    }

    #[test]
    fn parse_generates_id_when_header_missing() {
        let raw = b"From: a@b.com\r\nTo: c@d.com\r\nSubject: hi\r\n\r\nhello\r\n";
        let msg = Message::parse(raw).unwrap();
        assert!(!msg.id.is_empty());
    }

    #[test]
    fn parse_html_fallback_strips_tags() {
        let raw = b"From: a@b.com\r\nTo: c@d.com\r\nSubject: hi\r\n\
Content-Type: text/html\r\n\r\n<p>Hello <b>there</b></p>\r\n";
        let msg = Message::parse(raw).unwrap();
        assert_eq!(msg.body, "Hello there");
    }

    #[test]
    fn sender_domain_after_last_at() {
        let msg = Message {
            id: "1".into(),
            sender: "weird@user@acmecorp.com".into(),
            recipient: "inbox@router.example".into(),
            subject: String::new(),
            body: String::new(),
            attachments: vec![],
            received_at: Utc::now(),
        };
        assert_eq!(msg.sender_domain().as_deref(), Some("acmecorp.com"));
    }

    #[test]
    fn sender_domain_lowercased() {
        let msg = Message {
            id: "1".into(),
            sender: "Client@AcmeCorp.COM".into(),
            recipient: String::new(),
            subject: String::new(),
            body: String::new(),
            attachments: vec![],
            received_at: Utc::now(),
        };
        assert_eq!(msg.sender_domain().as_deref(), Some("acmecorp.com"));
    }

    #[test]
    fn sender_domain_none_without_at() {
        let msg = Message {
            id: "1".into(),
            sender: "not-an-address".into(),
            recipient: String::new(),
            subject: String::new(),
            body: String::new(),
            attachments: vec![],
            received_at: Utc::now(),
        };
        assert!(msg.sender_domain().is_none());
    }

    #[test]
    fn strip_html_nested_tags() {
        assert_eq!(strip_html("<div><b>Bold</b> and <i>italic</i></div>"), "Bold and italic");
    }
}
