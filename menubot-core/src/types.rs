//! Core types: sender, inbound message event, handler response, and Handler trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::payload::OutboundPayload;

/// Who sent an event and where the reply goes. Ids are transport-specific strings (e.g. Telegram numeric ids).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub id: String,
    /// Conversation to reply into; equals `id` for private chats.
    pub chat_id: String,
    pub display_name: Option<String>,
}

/// Body of an inbound message, decoded once at the transport boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageBody {
    /// Plain conversation text.
    Conversation(String),
    /// Extended text (captions, quoted or formatted text).
    ExtendedText(String),
    /// User pressed a quick-reply button carrying `id`.
    ButtonResponse { id: String },
    /// User picked a list row. Some platforms echo only the row title, so `row_id` is optional.
    ListResponse { row_id: Option<String>, title: String },
    /// Anything the bot does not read (stickers, photos, ...); value names the kind for logs.
    Unsupported(String),
}

impl MessageBody {
    /// Short name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            MessageBody::Conversation(_) => "conversation",
            MessageBody::ExtendedText(_) => "extended_text",
            MessageBody::ButtonResponse { .. } => "button_response",
            MessageBody::ListResponse { .. } => "list_response",
            MessageBody::Unsupported(_) => "unsupported",
        }
    }
}

/// One inbound event from the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEvent {
    /// Transport message id (or callback id); used for log correlation only.
    pub id: String,
    pub sender: Sender,
    /// Echo of a message the bot sent itself.
    pub from_me: bool,
    pub body: Option<MessageBody>,
}

impl MessageEvent {
    /// Builds an incoming (not self-sent) event.
    pub fn incoming(id: impl Into<String>, sender: Sender, body: MessageBody) -> Self {
        Self {
            id: id.into(),
            sender,
            from_me: false,
            body: Some(body),
        }
    }

    /// Body kind for log fields; `"empty"` when there is no body.
    pub fn body_kind(&self) -> &'static str {
        self.body.as_ref().map(MessageBody::kind).unwrap_or("empty")
    }
}

/// Converts a transport-specific update into a core [`MessageEvent`].
pub trait ToMessageEvent: Send + Sync {
    fn to_event(&self) -> MessageEvent;
}

/// Handler result for the chain. `Reply(payload)` carries the outbound payload so later handlers can see it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; nothing to send.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and send this payload to the sender.
    Reply(OutboundPayload),
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _event: &MessageEvent) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the event. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _event: &MessageEvent) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _event: &MessageEvent,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}
