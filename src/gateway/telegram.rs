//! Telegram gateway backed by teloxide

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::payloads::SendMessageSetters;
use teloxide::types::ReplyParameters;

use crate::state::UserId;
use crate::utils::errors::Result;
use super::{InboundEvent, MessageGateway};

impl InboundEvent for Message {
    // Replies go to the chat, so the chat is the conversation key
    fn sender(&self) -> UserId {
        UserId::new(self.chat.id.to_string())
    }

    fn body(&self) -> Option<&str> {
        self.text()
    }
}

/// Replies to Telegram messages in their originating chat
#[derive(Debug, Clone)]
pub struct TelegramGateway {
    bot: Bot,
}

impl TelegramGateway {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MessageGateway for TelegramGateway {
    type Event = Message;

    async fn reply(&self, event: &Message, text: &str) -> Result<()> {
        self.bot
            .send_message(event.chat.id, text)
            .reply_parameters(ReplyParameters::new(event.id))
            .await?;
        Ok(())
    }
}
