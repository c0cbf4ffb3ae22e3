//! Messaging gateway module
//!
//! The conversation core only needs two things from a messaging client: the
//! sender and text of an inbound message, and a way to reply to it. These
//! traits describe that contract; `telegram` provides the teloxide-backed
//! implementation.

pub mod telegram;

use async_trait::async_trait;

use crate::state::UserId;
use crate::utils::errors::Result;

pub use telegram::TelegramGateway;

/// An inbound message as seen by the dispatcher
pub trait InboundEvent: Send + Sync {
    /// Session key of the sender
    fn sender(&self) -> UserId;

    /// Text of the message, `None` for media and service messages
    fn body(&self) -> Option<&str>;
}

/// Outbound side of a messaging client
#[async_trait]
pub trait MessageGateway: Send + Sync {
    type Event: InboundEvent;

    /// Send `text` back to the sender of `event`
    async fn reply(&self, event: &Self::Event, text: &str) -> Result<()>;
}
