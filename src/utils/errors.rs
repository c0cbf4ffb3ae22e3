//! Error handling for RelayBot
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for RelayBot application
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("NLU backend error: {0}")]
    Nlu(#[from] NluError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("Invalid conversation state: {0}")]
    InvalidState(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Token signing error: {0}")]
    TokenSigning(#[from] jsonwebtoken::errors::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// NLU backend specific errors
#[derive(Error, Debug)]
pub enum NluError {
    #[error("NLU request failed: {0}")]
    RequestFailed(String),

    #[error("NLU authentication failed: {0}")]
    Unauthorized(String),

    #[error("Invalid NLU response: {0}")]
    InvalidResponse(String),

    #[error("NLU request timed out")]
    Timeout,
}

/// Result type alias for RelayBot operations
pub type Result<T> = std::result::Result<T, RelayError>;

/// Result type alias for NLU operations
pub type NluResult<T> = std::result::Result<T, NluError>;

impl RelayError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            RelayError::Telegram(_) => true,
            RelayError::Nlu(NluError::Unauthorized(_)) => false,
            RelayError::Nlu(_) => true,
            RelayError::Config(_) => false,
            RelayError::Credentials(_) => false,
            RelayError::InvalidState(_) => false,
            RelayError::Http(_) => true,
            RelayError::Serialization(_) => false,
            RelayError::TokenSigning(_) => false,
            RelayError::Io(_) => true,
            RelayError::UrlParse(_) => false,
            RelayError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RelayError::Config(_) => ErrorSeverity::Critical,
            RelayError::Credentials(_) => ErrorSeverity::Critical,
            RelayError::TokenSigning(_) => ErrorSeverity::Critical,
            RelayError::Nlu(NluError::Unauthorized(_)) => ErrorSeverity::Critical,
            RelayError::InvalidInput(_) => ErrorSeverity::Info,
            RelayError::InvalidState(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

impl From<reqwest::Error> for NluError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            NluError::Timeout
        } else if e.is_decode() {
            NluError::InvalidResponse(e.to_string())
        } else {
            NluError::RequestFailed(e.to_string())
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
