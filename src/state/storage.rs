//! Session storage implementation
//!
//! This module keeps each user's conversation state in memory for the
//! lifetime of the process. Every user gets their own async lock so the
//! read-modify-write cycle of a message can be held across awaits without
//! blocking other users.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

use super::context::{ConversationState, UserId};

/// Handle to one user's conversation state
pub type Session = Arc<tokio::sync::Mutex<ConversationState>>;

/// In-memory session store keyed by [`UserId`]
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<UserId, Session>>,
}

impl SessionStore {
    /// Create an empty session store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the session for a user, creating it in [`ConversationState::Init`] on first use.
    ///
    /// Locking the returned handle serializes all work on that user's state.
    pub fn session(&self, user_id: &UserId) -> Session {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());

        sessions
            .entry(user_id.clone())
            .or_insert_with(|| {
                debug!(user_id = %user_id, "Creating session");
                Arc::new(tokio::sync::Mutex::new(ConversationState::Init))
            })
            .clone()
    }

    /// Current state of a user; [`ConversationState::Init`] if never seen
    pub async fn get(&self, user_id: &UserId) -> ConversationState {
        *self.session(user_id).lock().await
    }

    /// Overwrite the state of a user
    pub async fn set(&self, user_id: &UserId, state: ConversationState) {
        *self.session(user_id).lock().await = state;
    }

    /// Number of users with a session
    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_user_reads_init() {
        let store = SessionStore::new();
        assert!(store.is_empty());

        assert_eq!(store.get(&UserId::from("1")).await, ConversationState::Init);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = SessionStore::new();
        let user = UserId::from("1");

        store.set(&user, ConversationState::CheckPoints).await;
        assert_eq!(store.get(&user).await, ConversationState::CheckPoints);

        store.set(&user, ConversationState::Init).await;
        assert_eq!(store.get(&user).await, ConversationState::Init);
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let store = SessionStore::new();
        let alice = UserId::from("alice");
        let bob = UserId::from("bob");

        store.set(&bob, ConversationState::AskedService).await;
        store.set(&alice, ConversationState::VerifyProduct).await;
        store.set(&alice, ConversationState::Init).await;

        assert_eq!(store.get(&bob).await, ConversationState::AskedService);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_session_handles_share_state() {
        let store = SessionStore::new();
        let user = UserId::from("1");

        let first = store.session(&user);
        let second = store.session(&user);
        assert!(Arc::ptr_eq(&first, &second));

        *first.lock().await = ConversationState::AskedService;
        assert_eq!(*second.lock().await, ConversationState::AskedService);
    }
}
