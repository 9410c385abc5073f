//! Mock implementation of [`menubot_core::Bot`] for integration tests.
//!
//! Records every `send_payload` call so tests can assert on the outbound payloads without a transport.

use async_trait::async_trait;
use menubot_core::{Bot, DbotError, OutboundPayload, Result, Sender};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// One recorded call to `send_payload(recipient, payload)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRecord {
    pub chat_id: String,
    pub payload: OutboundPayload,
}

/// Mock Bot that records sends; `failing()` makes every send return an error.
pub struct MockBot {
    fail: bool,
    attempts: AtomicUsize,
    sent: Mutex<Vec<SendRecord>>,
}

impl MockBot {
    pub fn new() -> Self {
        Self {
            fail: false,
            attempts: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn sent(&self) -> Vec<SendRecord> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_payload(&self, recipient: &Sender, payload: &OutboundPayload) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DbotError::Bot("mock send failure".to_string()));
        }
        self.sent.lock().unwrap().push(SendRecord {
            chat_id: recipient.chat_id.clone(),
            payload: payload.clone(),
        });
        Ok(())
    }
}
