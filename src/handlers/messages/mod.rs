//! Message handlers module
//!
//! Handles incoming Telegram text messages

use std::sync::Arc;
use teloxide::{Bot, types::Message};

use crate::gateway::TelegramGateway;
use crate::handlers::ConversationDispatcher;
use crate::utils::errors::Result;

/// Handle incoming text messages
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    dispatcher: Arc<ConversationDispatcher>,
) -> Result<()> {
    let gateway = TelegramGateway::new(bot);
    dispatcher.handle(&gateway, &msg).await
}
