//! Issue formatting — turns a message into an issue title and body.

use crate::message::Message;

/// Title and Markdown body for a tracked issue.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueContent {
    pub title: String,
    pub body: String,
}

/// Format a message as an issue for the client's repository.
pub fn format_issue(message: &Message, client_name: &str) -> IssueContent {
    let title = format!("[{}] {}", client_name, message.subject);

    let mut body = format!("## Email from {client_name}\n\n");
    body.push_str(&format!("**From:** {}\n", message.sender));
    body.push_str(&format!("**Date:** {}\n", message.received_at.to_rfc2822()));
    body.push_str(&format!("**Subject:** {}\n\n", message.subject));
    body.push_str("## Content\n\n");
    body.push_str(&message.body);

    if !message.attachments.is_empty() {
        body.push_str("\n\n## Attachments\n\n");
        for attachment in &message.attachments {
            body.push_str(&format!("- {attachment}\n"));
        }
    }

    IssueContent { title, body }
}
