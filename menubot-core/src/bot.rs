//! Bot abstraction for sending replies.
//!
//! [`Bot`] is transport-agnostic; menubot-telegram implements it via teloxide and tests use a recording mock.

use crate::error::{DbotError, Result};
use crate::payload::OutboundPayload;
use crate::types::Sender;
use async_trait::async_trait;

/// Sends payloads to a recipient. One value is one live connection handle; after a reconnect the runner builds a new one.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends `payload` into the sender's chat.
    async fn send_payload(&self, recipient: &Sender, payload: &OutboundPayload) -> Result<()>;
}

/// Parses a numeric chat id string (Telegram ids are i64).
pub fn parse_chat_id(s: &str) -> Result<i64> {
    s.parse()
        .map_err(|_| DbotError::Bot(format!("Invalid chat_id: {}", s)))
}
