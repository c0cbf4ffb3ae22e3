//! Test helpers module
//!
//! This module provides utilities and helpers for testing the RelayBot application.
//! It includes a mock Dialogflow server, an in-memory gateway, and test setup.

#![allow(dead_code)]

pub mod dialogflow_mock;
pub mod recording_gateway;
pub mod simple_test;

pub use dialogflow_mock::*;
pub use recording_gateway::*;
pub use simple_test::*;

use std::sync::Arc;
use RelayBot::handlers::{ConversationDispatcher, MenuStrategy, ReplyStrategy};
use RelayBot::state::SessionStore;

/// Dispatcher running the menu flow over a fresh session store
pub fn menu_dispatcher() -> ConversationDispatcher {
    dispatcher_with(Arc::new(MenuStrategy))
}

pub fn dispatcher_with(strategy: Arc<dyn ReplyStrategy>) -> ConversationDispatcher {
    init_test_env();
    ConversationDispatcher::new(Arc::new(SessionStore::new()), strategy)
}
