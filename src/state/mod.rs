//! State management module
//!
//! This module handles per-user conversation state and the menu flow

pub mod context;
pub mod intent;
pub mod scenarios;
pub mod storage;

// Re-export commonly used state components
pub use context::{ConversationState, UserId};
pub use intent::{classify, Intent};
pub use scenarios::{transition, TransitionResult};
pub use storage::{Session, SessionStore};
