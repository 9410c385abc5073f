//! Outbound payloads: the transport-independent shape of a reply before rendering.

use serde::{Deserialize, Serialize};

/// Quick-reply button: `id` comes back in the button response, `label` is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub id: String,
    pub label: String,
}

impl Button {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// One selectable row of a list message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRow {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// Titled group of rows in a list message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSection {
    pub title: String,
    pub rows: Vec<ListRow>,
}

/// Reply to send, built fresh per response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutboundPayload {
    PlainText(String),
    ButtonMessage {
        text: String,
        footer: String,
        buttons: Vec<Button>,
    },
    ListMessage {
        text: String,
        button_label: String,
        sections: Vec<ListSection>,
    },
}

/// Payload variant name, for log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    PlainText,
    ButtonMessage,
    ListMessage,
}

impl PayloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadKind::PlainText => "plain_text",
            PayloadKind::ButtonMessage => "button_message",
            PayloadKind::ListMessage => "list_message",
        }
    }
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl OutboundPayload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            OutboundPayload::PlainText(_) => PayloadKind::PlainText,
            OutboundPayload::ButtonMessage { .. } => PayloadKind::ButtonMessage,
            OutboundPayload::ListMessage { .. } => PayloadKind::ListMessage,
        }
    }

    /// Main body text of the payload.
    pub fn text(&self) -> &str {
        match self {
            OutboundPayload::PlainText(text)
            | OutboundPayload::ButtonMessage { text, .. }
            | OutboundPayload::ListMessage { text, .. } => text,
        }
    }

    /// Every selectable id in display order (button ids or list row ids).
    pub fn option_ids(&self) -> Vec<&str> {
        match self {
            OutboundPayload::PlainText(_) => Vec::new(),
            OutboundPayload::ButtonMessage { buttons, .. } => {
                buttons.iter().map(|b| b.id.as_str()).collect()
            }
            OutboundPayload::ListMessage { sections, .. } => sections
                .iter()
                .flat_map(|s| s.rows.iter().map(|r| r.id.as_str()))
                .collect(),
        }
    }
}
