//! Services module
//!
//! This module contains the clients for external services

pub mod credentials;
pub mod dialogflow;

// Re-export commonly used services
pub use credentials::{ServiceAccountCredentials, TokenProvider};
pub use dialogflow::{DialogflowClient, NluBackend};
