//! Conversation context types
//!
//! This module defines the user identifier used as the session key and the
//! closed set of states the manual menu flow can be in.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::utils::errors::RelayError;

/// Opaque identifier of a message sender, used as the session key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// State of a user's conversation in the menu flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversationState {
    /// No conversation yet, or a cycle just finished
    #[default]
    Init,
    /// Greeting sent, waiting for the user to pick a service
    AskedService,
    /// Waiting for a product ID
    VerifyProduct,
    /// Waiting for a user ID
    CheckPoints,
}

impl ConversationState {
    pub const ALL: [ConversationState; 4] = [
        ConversationState::Init,
        ConversationState::AskedService,
        ConversationState::VerifyProduct,
        ConversationState::CheckPoints,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationState::Init => "INIT",
            ConversationState::AskedService => "ASKED_SERVICE",
            ConversationState::VerifyProduct => "VERIFY_PRODUCT",
            ConversationState::CheckPoints => "CHECK_POINTS",
        }
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversationState {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| RelayError::InvalidState(s.to_string()))
    }
}
