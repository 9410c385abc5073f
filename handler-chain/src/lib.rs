//! # Handler chain
//!
//! Runs a sequence of handlers (before / handle / after) for each inbound event. Any `before` can stop
//! the chain; the first handler that returns Stop or Reply ends the handle phase; after callbacks run in reverse order.
//! [`HandlerChain::process`] also sends the reply through the connection handle it is given.

use menubot_core::{Bot, Handler, HandlerResponse, MessageEvent, PayloadKind, Result};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// What happened to one event in [`HandlerChain::process`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// A reply of this kind was sent.
    Sent(PayloadKind),
    /// The chain produced a reply but the transport failed to send it.
    SendFailed(PayloadKind),
    /// The chain finished without a reply (ignored event, Stop, or Continue).
    NoReply,
    /// A handler returned an error; nothing was sent.
    ChainFailed,
}

/// Ordered handlers: before runs first→last, handle runs until Stop/Reply, after runs last→first.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs before (all), handle (until Stop/Reply), then after (reverse). Returns first Stop or Reply, or Continue.
    #[instrument(skip(self, event), fields(event_id = %event.id))]
    pub async fn handle(&self, event: &MessageEvent) -> Result<HandlerResponse> {
        let mut final_response = HandlerResponse::Continue;

        debug!(
            sender_id = %event.sender.id,
            chat_id = %event.sender.chat_id,
            body_kind = event.body_kind(),
            "step: handler_chain started"
        );

        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            if !handler.before(event).await? {
                info!(
                    sender_id = %event.sender.id,
                    handler = %handler_name,
                    "step: handler before returned false, chain stopped"
                );
                return Ok(HandlerResponse::Stop);
            }
        }

        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            let response = handler.handle(event).await?;
            debug!(
                handler = %handler_name,
                response = ?response,
                "step: handler done"
            );

            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    final_response = response;
                    break;
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => continue,
            }
        }

        for handler in self.handlers.iter().rev() {
            handler.after(event, &final_response).await?;
        }

        debug!(
            sender_id = %event.sender.id,
            event_id = %event.id,
            "step: handler_chain finished"
        );

        Ok(final_response)
    }

    /// Runs the chain for `event` and sends any reply with `bot`, the current connection handle.
    /// Chain and send failures are logged, never propagated: the caller keeps serving the next event.
    #[instrument(skip(self, bot, event), fields(event_id = %event.id))]
    pub async fn process(&self, bot: &dyn Bot, event: &MessageEvent) -> ProcessOutcome {
        let response = match self.handle(event).await {
            Ok(response) => response,
            Err(e) => {
                error!(
                    error = %e,
                    sender_id = %event.sender.id,
                    "Handler chain failed"
                );
                return ProcessOutcome::ChainFailed;
            }
        };

        let HandlerResponse::Reply(payload) = response else {
            return ProcessOutcome::NoReply;
        };

        let kind = payload.kind();
        match bot.send_payload(&event.sender, &payload).await {
            Ok(()) => {
                info!(
                    recipient = %event.sender.chat_id,
                    payload_kind = %kind,
                    "Reply sent"
                );
                ProcessOutcome::Sent(kind)
            }
            Err(e) => {
                error!(
                    error = %e,
                    recipient = %event.sender.chat_id,
                    payload_kind = %kind,
                    "Failed to send reply"
                );
                ProcessOutcome::SendFailed(kind)
            }
        }
    }
}

// Tests live in tests/handler_chain_test.rs
