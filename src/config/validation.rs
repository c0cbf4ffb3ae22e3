//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{RelayError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_nlu_config(&settings.nlu)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(RelayError::Config(
            "Bot token is required".to_string()
        ));
    }

    Ok(())
}

/// Validate Dialogflow configuration
fn validate_nlu_config(config: &super::NluConfig) -> Result<()> {
    url::Url::parse(&config.base_url)
        .map_err(|e| RelayError::Config(format!("Invalid NLU base URL {}: {}", config.base_url, e)))?;

    if config.language_code.is_empty() {
        return Err(RelayError::Config(
            "NLU language code is required".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(RelayError::Config(
            "NLU timeout must be greater than 0".to_string()
        ));
    }

    if config.credentials_env.is_empty() {
        return Err(RelayError::Config(
            "Credentials environment variable name is required".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(RelayError::Config(
            "Log level is required".to_string()
        ));
    }

    // Same parser init_logging uses, so per-target directives are accepted
    tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| RelayError::Config(format!("Invalid log level {}: {}", config.level, e)))?;

    Ok(())
}
