//! Conversation dispatcher
//!
//! Routes each inbound message through the active reply strategy. The
//! sender's session lock is held from reading the state until the reply has
//! been handed to the gateway, so messages from one user are handled one at
//! a time and in a single order, while different users run concurrently.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::gateway::{InboundEvent, MessageGateway};
use crate::state::SessionStore;
use crate::utils::errors::Result;
use crate::utils::logging;
use super::strategies::ReplyStrategy;

/// Connects a message gateway to the session store and a reply strategy
pub struct ConversationDispatcher {
    sessions: Arc<SessionStore>,
    strategy: Arc<dyn ReplyStrategy>,
}

impl ConversationDispatcher {
    pub fn new(sessions: Arc<SessionStore>, strategy: Arc<dyn ReplyStrategy>) -> Self {
        Self { sessions, strategy }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handle one inbound message.
    ///
    /// Strategy errors are returned without replying or touching the state.
    /// Gateway errors are logged and swallowed; the committed state stays.
    pub async fn handle<G: MessageGateway>(&self, gateway: &G, event: &G::Event) -> Result<()> {
        let Some(text) = event.body() else {
            debug!("Ignoring message without text");
            return Ok(());
        };

        let user_id = event.sender();
        info!(user_id = %user_id, mode = %self.strategy.mode(), "Message received");

        let session = self.sessions.session(&user_id);
        let mut state = session.lock().await;

        let result = self.strategy.respond(&user_id, *state, text).await?;

        if *state != result.next_state {
            logging::log_transition(user_id.as_str(), *state, result.next_state);
        }
        *state = result.next_state;

        if result.reply.is_empty() {
            warn!(user_id = %user_id, "Strategy produced an empty reply, nothing sent");
            return Ok(());
        }

        if let Err(e) = gateway.reply(event, &result.reply).await {
            error!(user_id = %user_id, error = %e, severity = %e.severity(), "Failed to deliver reply");
        }

        Ok(())
    }
}
