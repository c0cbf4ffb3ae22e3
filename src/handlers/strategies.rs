//! Reply strategies
//!
//! A strategy turns one inbound message into a reply and the user's next
//! conversation state. The menu flow drives the state machine; the NLU
//! strategy hands the text to the NLU backend and leaves the state alone.

use std::sync::Arc;
use async_trait::async_trait;

use crate::config::{DispatchMode, Settings};
use crate::services::{DialogflowClient, NluBackend};
use crate::state::{transition, ConversationState, TransitionResult, UserId};
use crate::utils::errors::Result;
use crate::utils::logging;

/// Produces the reply for a message given the sender's current state
#[async_trait]
pub trait ReplyStrategy: Send + Sync {
    fn mode(&self) -> DispatchMode;

    async fn respond(&self, user_id: &UserId, state: ConversationState, text: &str) -> Result<TransitionResult>;
}

/// Built-in verify/points menu
#[derive(Debug, Clone, Copy, Default)]
pub struct MenuStrategy;

#[async_trait]
impl ReplyStrategy for MenuStrategy {
    fn mode(&self) -> DispatchMode {
        DispatchMode::StateMachine
    }

    async fn respond(&self, user_id: &UserId, state: ConversationState, text: &str) -> Result<TransitionResult> {
        Ok(transition(state, user_id, text))
    }
}

/// Relays every message to an NLU backend, using the user id as session id
pub struct NluStrategy {
    backend: Arc<dyn NluBackend>,
    language_code: String,
}

impl NluStrategy {
    pub fn new(backend: Arc<dyn NluBackend>, language_code: impl Into<String>) -> Self {
        Self {
            backend,
            language_code: language_code.into(),
        }
    }
}

#[async_trait]
impl ReplyStrategy for NluStrategy {
    fn mode(&self) -> DispatchMode {
        DispatchMode::Nlu
    }

    async fn respond(&self, user_id: &UserId, state: ConversationState, text: &str) -> Result<TransitionResult> {
        let reply = self
            .backend
            .detect_intent(user_id.as_str(), text, &self.language_code)
            .await
            .inspect_err(|e| logging::log_api_error("dialogflow", &e.to_string(), Some(user_id.as_str())))?;

        Ok(TransitionResult {
            next_state: state,
            reply,
        })
    }
}

/// Build the strategy selected by `settings.dispatch.mode`.
///
/// Only the NLU mode needs credentials; the menu mode starts without them.
pub fn create_strategy(settings: &Settings) -> Result<Arc<dyn ReplyStrategy>> {
    match settings.dispatch.mode {
        DispatchMode::StateMachine => Ok(Arc::new(MenuStrategy)),
        DispatchMode::Nlu => {
            let client = DialogflowClient::from_env(&settings.nlu)?;
            tracing::info!(project_id = %client.project_id(), "Dialogflow client configured");
            Ok(Arc::new(NluStrategy::new(Arc::new(client), settings.nlu.language_code.clone())))
        }
    }
}
