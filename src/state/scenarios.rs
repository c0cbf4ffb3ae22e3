//! Menu conversation scenario
//!
//! The manual flow greets the user, lets them pick "verify product" or
//! "check points", asks for one value and returns to the start. Transitions
//! are pure: the caller owns committing the next state and sending the reply.

use tracing::trace;

use super::context::{ConversationState, UserId};
use super::intent::{classify, Intent};

/// Resets any conversation to [`ConversationState::Init`] when sent as the whole message
pub const BACK_COMMAND: &str = "back";
/// Product ID accepted as valid
pub const VALID_PRODUCT_TOKEN: &str = "valid_number";
/// User ID accepted as valid
pub const VALID_ID_TOKEN: &str = "valid_id";

pub const GREETING: &str =
    "Hi, how can I assist you today? You can verify your product or check your points";
pub const VERIFY_PROMPT: &str = "You chose to verify your product, please enter your product ID";
pub const POINTS_PROMPT: &str = "You chose to check your points, please enter your ID";
pub const NOT_UNDERSTOOD: &str = "I don't understand, type 'back' to return to the start";
pub const PRODUCT_VALID: &str = "Your product is valid";
pub const PRODUCT_INVALID: &str = "Your product is not valid, you are returning to the start";
pub const POINTS_BALANCE: &str = "You have 100 points";
pub const ID_INVALID: &str = "Invalid ID, you are returning to the start";

/// Outcome of feeding one message into the flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    pub next_state: ConversationState,
    pub reply: String,
}

impl TransitionResult {
    fn new(next_state: ConversationState, reply: &str) -> Self {
        Self {
            next_state,
            reply: reply.to_string(),
        }
    }
}

/// Compute the next state and reply for `text` received in `state`
pub fn transition(state: ConversationState, user_id: &UserId, text: &str) -> TransitionResult {
    let state = if text.to_lowercase() == BACK_COMMAND {
        ConversationState::Init
    } else {
        state
    };

    let result = match state {
        ConversationState::Init => TransitionResult::new(ConversationState::AskedService, GREETING),
        ConversationState::AskedService => match classify(text) {
            Intent::Verify => TransitionResult::new(ConversationState::VerifyProduct, VERIFY_PROMPT),
            Intent::Points => TransitionResult::new(ConversationState::CheckPoints, POINTS_PROMPT),
            Intent::Unknown => TransitionResult::new(ConversationState::AskedService, NOT_UNDERSTOOD),
        },
        // Sentinel checks are exact; both outcomes end the cycle
        ConversationState::VerifyProduct => {
            let reply = if text == VALID_PRODUCT_TOKEN { PRODUCT_VALID } else { PRODUCT_INVALID };
            TransitionResult::new(ConversationState::Init, reply)
        }
        ConversationState::CheckPoints => {
            let reply = if text == VALID_ID_TOKEN { POINTS_BALANCE } else { ID_INVALID };
            TransitionResult::new(ConversationState::Init, reply)
        }
    };

    trace!(user_id = %user_id, from = %state, to = %result.next_state, "Menu transition computed");
    result
}
