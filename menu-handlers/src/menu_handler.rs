//! Terminal handler: classify the event, dispatch the intent, reply with the payload.

use std::sync::Arc;

use async_trait::async_trait;
use menubot_core::{Handler, HandlerResponse, MessageEvent, Result};
use tracing::{debug, info, instrument};

use crate::catalog::Catalog;
use crate::classifier::Classifier;
use crate::clock::Clock;
use crate::dispatcher::Dispatcher;

#[derive(Clone)]
pub struct MenuHandler {
    classifier: Classifier,
    dispatcher: Dispatcher,
}

impl MenuHandler {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            classifier: Classifier::new(catalog.clone()),
            dispatcher: Dispatcher::new(catalog),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.dispatcher = self.dispatcher.with_clock(clock);
        self
    }

    pub fn with_max_inline_buttons(mut self, max: usize) -> Self {
        self.dispatcher = self.dispatcher.with_max_inline_buttons(max);
        self
    }
}

#[async_trait]
impl Handler for MenuHandler {
    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn handle(&self, event: &MessageEvent) -> Result<HandlerResponse> {
        let Some(intent) = self.classifier.classify(event) else {
            debug!(
                sender_id = %event.sender.id,
                from_me = event.from_me,
                body_kind = event.body_kind(),
                "Event ignored"
            );
            return Ok(HandlerResponse::Ignore);
        };

        let payload = self.dispatcher.dispatch(&intent);
        info!(
            sender_id = %event.sender.id,
            intent = %intent,
            payload_kind = %payload.kind(),
            "Intent dispatched"
        );
        Ok(HandlerResponse::Reply(payload))
    }
}
