//! Integration tests for [`handler_chain::HandlerChain`].
//!
//! Covers: handler before/after order, handler before stopping the chain, Reply stopping the chain
//! and being passed to handler after, and `process` sending (or failing to send) the reply.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use handler_chain::{HandlerChain, ProcessOutcome};
use menubot_core::{
    Bot, DbotError, Handler, HandlerResponse, MessageBody, MessageEvent, OutboundPayload,
    PayloadKind, Sender,
};

fn create_test_event(content: &str) -> MessageEvent {
    MessageEvent::incoming(
        "test_event_id",
        Sender {
            id: "123".to_string(),
            chat_id: "456".to_string(),
            display_name: Some("Test".to_string()),
        },
        MessageBody::Conversation(content.to_string()),
    )
}

/// **Test: Handler before and after run; handle runs once.**
#[tokio::test]
async fn test_handler_chain_with_handler() {
    let before_count = Arc::new(AtomicUsize::new(0));
    let after_count = Arc::new(AtomicUsize::new(0));
    let handle_count = Arc::new(AtomicUsize::new(0));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(TestBeforeAfterHandler {
            before_count: before_count.clone(),
            after_count: after_count.clone(),
        }))
        .add_handler(Arc::new(TestHandler {
            handle_count: handle_count.clone(),
        }));

    let result = chain.handle(&create_test_event("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Continue);
    assert_eq!(before_count.load(Ordering::SeqCst), 1);
    assert_eq!(handle_count.load(Ordering::SeqCst), 1);
    assert_eq!(after_count.load(Ordering::SeqCst), 1);
}

/// **Test: Handler before returns false stops the chain; handle is not run.**
#[tokio::test]
async fn test_handler_stops_chain() {
    struct BlockingHandler;

    #[async_trait]
    impl Handler for BlockingHandler {
        async fn before(&self, _event: &MessageEvent) -> menubot_core::Result<bool> {
            Ok(false)
        }
    }

    let handle_count = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(BlockingHandler))
        .add_handler(Arc::new(TestHandler {
            handle_count: handle_count.clone(),
        }));

    let result = chain.handle(&create_test_event("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(handle_count.load(Ordering::SeqCst), 0);
}

/// **Test: Reply stops the chain and is passed to every handler's after.**
#[tokio::test]
async fn test_handler_reply_stops_chain_and_passes_to_after() {
    let after_count = Arc::new(AtomicUsize::new(0));
    let handle_count = Arc::new(AtomicUsize::new(0));

    struct CaptureResponseHandler {
        after_count: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Handler for CaptureResponseHandler {
        async fn after(
            &self,
            _event: &MessageEvent,
            response: &HandlerResponse,
        ) -> menubot_core::Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            assert_eq!(
                *response,
                HandlerResponse::Reply(OutboundPayload::PlainText("pong".to_string()))
            );
            Ok(())
        }
    }

    let chain = HandlerChain::new()
        .add_handler(Arc::new(CaptureResponseHandler {
            after_count: after_count.clone(),
        }))
        .add_handler(Arc::new(ReplyHandler))
        .add_handler(Arc::new(TestHandler {
            handle_count: handle_count.clone(),
        }));

    let result = chain.handle(&create_test_event("ping")).await.unwrap();

    assert_eq!(
        result,
        HandlerResponse::Reply(OutboundPayload::PlainText("pong".to_string()))
    );
    assert_eq!(after_count.load(Ordering::SeqCst), 1);
    assert_eq!(handle_count.load(Ordering::SeqCst), 0);
}

/// **Test: before runs first→last, after runs last→first.**
#[tokio::test]
async fn test_multiple_handlers_executed_in_order() {
    let order = Arc::new(Mutex::new(Vec::new()));

    struct OrderHandler {
        name: String,
        order: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Handler for OrderHandler {
        async fn before(&self, _event: &MessageEvent) -> menubot_core::Result<bool> {
            self.order.lock().unwrap().push(format!("before_{}", self.name));
            Ok(true)
        }

        async fn after(
            &self,
            _event: &MessageEvent,
            _response: &HandlerResponse,
        ) -> menubot_core::Result<()> {
            self.order.lock().unwrap().push(format!("after_{}", self.name));
            Ok(())
        }
    }

    let chain = HandlerChain::new()
        .add_handler(Arc::new(OrderHandler {
            name: "first".to_string(),
            order: order.clone(),
        }))
        .add_handler(Arc::new(OrderHandler {
            name: "second".to_string(),
            order: order.clone(),
        }));

    chain.handle(&create_test_event("test")).await.unwrap();

    let executed = order.lock().unwrap();
    assert_eq!(
        *executed,
        vec!["before_first", "before_second", "after_second", "after_first"]
    );
}

/// **Test: process sends the Reply through the given bot to the event's sender.**
#[tokio::test]
async fn test_process_sends_reply() {
    let bot = RecordingBot::new(false);
    let chain = HandlerChain::new().add_handler(Arc::new(ReplyHandler));

    let outcome = chain.process(&bot, &create_test_event("ping")).await;

    assert_eq!(outcome, ProcessOutcome::Sent(PayloadKind::PlainText));
    let sent = bot.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "456");
    assert_eq!(sent[0].1, OutboundPayload::PlainText("pong".to_string()));
}

/// **Test: a failed send is reported as SendFailed, not as an error.**
#[tokio::test]
async fn test_process_send_failure_is_contained() {
    let bot = RecordingBot::new(true);
    let chain = HandlerChain::new().add_handler(Arc::new(ReplyHandler));

    let outcome = chain.process(&bot, &create_test_event("ping")).await;

    assert_eq!(outcome, ProcessOutcome::SendFailed(PayloadKind::PlainText));
}

/// **Test: no Reply means nothing is sent; a handler error is ChainFailed.**
#[tokio::test]
async fn test_process_without_reply_or_with_error() {
    struct FailingHandler;

    #[async_trait]
    impl Handler for FailingHandler {
        async fn handle(&self, _event: &MessageEvent) -> menubot_core::Result<HandlerResponse> {
            Err(DbotError::Unknown("boom".to_string()))
        }
    }

    let bot = RecordingBot::new(false);

    let quiet = HandlerChain::new().add_handler(Arc::new(TestHandler {
        handle_count: Arc::new(AtomicUsize::new(0)),
    }));
    assert_eq!(
        quiet.process(&bot, &create_test_event("x")).await,
        ProcessOutcome::NoReply
    );

    let failing = HandlerChain::new().add_handler(Arc::new(FailingHandler));
    assert_eq!(
        failing.process(&bot, &create_test_event("x")).await,
        ProcessOutcome::ChainFailed
    );

    assert!(bot.sent.lock().unwrap().is_empty());
}

// --- Helpers used by tests ---

struct ReplyHandler;

#[async_trait]
impl Handler for ReplyHandler {
    async fn handle(&self, _event: &MessageEvent) -> menubot_core::Result<HandlerResponse> {
        Ok(HandlerResponse::Reply(OutboundPayload::PlainText(
            "pong".to_string(),
        )))
    }
}

struct TestBeforeAfterHandler {
    before_count: Arc<AtomicUsize>,
    after_count: Arc<AtomicUsize>,
}

#[async_trait]
impl Handler for TestBeforeAfterHandler {
    async fn before(&self, _event: &MessageEvent) -> menubot_core::Result<bool> {
        self.before_count.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn after(
        &self,
        _event: &MessageEvent,
        _response: &HandlerResponse,
    ) -> menubot_core::Result<()> {
        self.after_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct TestHandler {
    handle_count: Arc<AtomicUsize>,
}

#[async_trait]
impl Handler for TestHandler {
    async fn handle(&self, _event: &MessageEvent) -> menubot_core::Result<HandlerResponse> {
        self.handle_count.fetch_add(1, Ordering::SeqCst);
        Ok(HandlerResponse::Continue)
    }
}

/// Records (chat_id, payload) per send; fails every send when `fail` is set.
struct RecordingBot {
    fail: bool,
    sent: Mutex<Vec<(String, OutboundPayload)>>,
}

impl RecordingBot {
    fn new(fail: bool) -> Self {
        Self {
            fail,
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_payload(
        &self,
        recipient: &Sender,
        payload: &OutboundPayload,
    ) -> menubot_core::Result<()> {
        if self.fail {
            return Err(DbotError::Bot("network down".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((recipient.chat_id.clone(), payload.clone()));
        Ok(())
    }
}
