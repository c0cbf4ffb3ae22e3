//! RelayBot
//!
//! A chat bot that relays incoming messages to a Dialogflow agent and replies
//! with its fulfillment text. A built-in menu flow ("verify product" /
//! "check points") with per-user conversation state can be selected instead.

#![allow(non_snake_case)]

pub mod config;
pub mod gateway;
pub mod handlers;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{RelayError, Result};

// Re-export main components for easy access
pub use handlers::ConversationDispatcher;
pub use state::{ConversationState, SessionStore, UserId};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
