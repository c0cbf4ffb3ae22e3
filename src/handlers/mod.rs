//! Bot handlers module
//!
//! This module contains the message dispatcher, the reply strategies it can
//! run, and the teloxide endpoint that feeds it.

pub mod dispatcher;
pub mod messages;
pub mod strategies;

pub use dispatcher::ConversationDispatcher;
pub use strategies::{create_strategy, MenuStrategy, NluStrategy, ReplyStrategy};
