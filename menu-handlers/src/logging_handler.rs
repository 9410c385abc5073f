//! Logs each event in before() and the reply in after(); always continues.

use async_trait::async_trait;
use menubot_core::{Handler, HandlerResponse, MessageEvent, Result};
use tracing::{debug, info, instrument};

use crate::classifier::extract_text;

pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, event))]
    async fn before(&self, event: &MessageEvent) -> Result<bool> {
        info!(
            sender_id = %event.sender.id,
            chat_id = %event.sender.chat_id,
            sender_name = %event.sender.display_name.as_deref().unwrap_or("unknown"),
            body_kind = event.body_kind(),
            message_content = %event.body.as_ref().and_then(extract_text).unwrap_or(""),
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, event, response))]
    async fn after(&self, event: &MessageEvent, response: &HandlerResponse) -> Result<()> {
        let reply_kind = match response {
            HandlerResponse::Reply(payload) => payload.kind().as_str(),
            HandlerResponse::Stop => "stop",
            HandlerResponse::Continue | HandlerResponse::Ignore => "none",
        };
        debug!(
            event_id = %event.id,
            reply_kind = reply_kind,
            "Processed message"
        );
        Ok(())
    }
}
