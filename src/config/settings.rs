//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub dispatch: DispatchConfig,
    pub nlu: NluConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
}

/// Which reply strategy answers inbound messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// Built-in verify/points menu flow
    StateMachine,
    /// Forward every message to the NLU backend
    Nlu,
}

impl std::fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchMode::StateMachine => write!(f, "state_machine"),
            DispatchMode::Nlu => write!(f, "nlu"),
        }
    }
}

/// Dispatcher configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DispatchConfig {
    pub mode: DispatchMode,
}

/// Dialogflow configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NluConfig {
    pub base_url: String,
    pub language_code: String,
    pub timeout_seconds: u64,
    /// Name of the environment variable holding the service account JSON
    pub credentials_env: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the rolling log file; stdout only when unset
    pub file_path: Option<String>,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_file("config")
    }

    /// Load settings using `name` as the optional configuration file
    pub fn from_file(name: &str) -> Result<Self, config::ConfigError> {
        let defaults = Settings::default();

        let mut builder = config::Config::builder()
            .set_default("bot.token", defaults.bot.token)?
            .set_default("dispatch.mode", defaults.dispatch.mode.to_string())?
            .set_default("nlu.base_url", defaults.nlu.base_url)?
            .set_default("nlu.language_code", defaults.nlu.language_code)?
            .set_default("nlu.timeout_seconds", defaults.nlu.timeout_seconds as i64)?
            .set_default("nlu.credentials_env", defaults.nlu.credentials_env)?
            .set_default("logging.level", defaults.logging.level)?
            .add_source(config::File::with_name(name).required(false))
            .add_source(config::Environment::with_prefix("RELAY").separator("__"));

        // Same variable teloxide's `Bot::from_env` reads
        if let Ok(token) = std::env::var("TELOXIDE_TOKEN") {
            builder = builder.set_default("bot.token", token)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::RelayError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
            },
            dispatch: DispatchConfig {
                mode: DispatchMode::Nlu,
            },
            nlu: NluConfig {
                base_url: "https://dialogflow.googleapis.com".to_string(),
                language_code: "en-US".to_string(),
                timeout_seconds: 30,
                credentials_env: "CREDENTIALS".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
            },
        }
    }
}
