//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the RelayBot application.

use tracing::{info, debug, error};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::state::ConversationState;
use crate::utils::errors::{RelayError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file appender when dropped, so the caller
/// must keep it alive for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| RelayError::Config(format!("Invalid log filter: {}", e)))?;

    let (file_layer, guard) = match config.file_path.as_deref().filter(|p| !p.is_empty()) {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "relay-bot.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(file_layer)
        .try_init()
        .map_err(|e| RelayError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a conversation state transition
pub fn log_transition(user_id: &str, from: ConversationState, to: ConversationState) {
    debug!(
        user_id = user_id,
        from = %from,
        to = %to,
        "Conversation state transition"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}
