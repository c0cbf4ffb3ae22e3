//! In-memory message gateway for testing
//!
//! Records every reply so tests can assert on what the bot would have sent.

use std::sync::Mutex;
use std::time::Duration;
use async_trait::async_trait;

use RelayBot::gateway::{InboundEvent, MessageGateway};
use RelayBot::state::UserId;
use RelayBot::utils::errors::{RelayError, Result};

/// Inbound text message from a test user
#[derive(Debug, Clone)]
pub struct TestMessage {
    pub from: UserId,
    pub body: Option<String>,
}

impl TestMessage {
    pub fn text(from: &str, body: &str) -> Self {
        Self {
            from: UserId::from(from),
            body: Some(body.to_string()),
        }
    }
}

impl InboundEvent for TestMessage {
    fn sender(&self) -> UserId {
        self.from.clone()
    }

    fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// A reply recorded by [`RecordingGateway`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentReply {
    pub to: UserId,
    pub in_reply_to: Option<String>,
    pub text: String,
}

/// Gateway that stores replies instead of sending them
#[derive(Debug, Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<SentReply>>,
    /// Sleep before recording each reply, to widen interleaving windows
    pub delay: Option<Duration>,
    pub fail: bool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<SentReply> {
        self.sent.lock().unwrap().clone()
    }

    /// Texts sent to one user, in send order
    pub fn texts_for(&self, user: &str) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|r| r.to.as_str() == user)
            .map(|r| r.text)
            .collect()
    }
}

#[async_trait]
impl MessageGateway for RecordingGateway {
    type Event = TestMessage;

    async fn reply(&self, event: &TestMessage, text: &str) -> Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(RelayError::InvalidInput("gateway disconnected".to_string()));
        }

        self.sent.lock().unwrap().push(SentReply {
            to: event.from.clone(),
            in_reply_to: event.body.clone(),
            text: text.to_string(),
        });
        Ok(())
    }
}
