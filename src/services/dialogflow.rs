//! Dialogflow NLU service implementation
//!
//! This service forwards user text to a Dialogflow ES agent through the v2
//! REST `detectIntent` endpoint and returns the agent's fulfillment text.
//! Each user's session id keeps their Dialogflow context separate.

use std::time::Duration;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::NluConfig;
use crate::utils::errors::{NluError, NluResult, RelayError, Result};
use super::credentials::{ServiceAccountCredentials, TokenProvider};

/// Natural-language backend that turns a message into a reply
#[async_trait]
pub trait NluBackend: Send + Sync {
    /// Detect the intent of `text` within `session_id` and return the fulfillment text
    async fn detect_intent(&self, session_id: &str, text: &str, language_code: &str) -> NluResult<String>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectIntentRequest<'a> {
    query_input: QueryInput<'a>,
}

#[derive(Debug, Serialize)]
struct QueryInput<'a> {
    text: TextInput<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TextInput<'a> {
    text: &'a str,
    language_code: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetectIntentResponse {
    query_result: Option<QueryResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResult {
    // proto3 JSON omits empty strings
    #[serde(default)]
    fulfillment_text: String,
}

/// Dialogflow ES client authenticated with a service account
#[derive(Debug)]
pub struct DialogflowClient {
    http_client: reqwest::Client,
    base_url: String,
    tokens: TokenProvider,
}

impl DialogflowClient {
    /// Create a new DialogflowClient instance
    pub fn new(config: &NluConfig, credentials: ServiceAccountCredentials) -> Result<Self> {
        url::Url::parse(&config.base_url)?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("RelayBot/1.0")
            .build()
            .map_err(RelayError::Http)?;

        let tokens = TokenProvider::new(credentials, http_client.clone())?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// Create a client from the credentials named by `config.credentials_env`
    pub fn from_env(config: &NluConfig) -> Result<Self> {
        let credentials = ServiceAccountCredentials::from_env(&config.credentials_env)?;
        Self::new(config, credentials)
    }

    pub fn project_id(&self) -> &str {
        self.tokens.project_id()
    }

    fn session_url(&self, session_id: &str) -> String {
        format!(
            "{}/v2/projects/{}/agent/sessions/{}:detectIntent",
            self.base_url,
            urlencoding::encode(self.project_id()),
            urlencoding::encode(session_id),
        )
    }
}

#[async_trait]
impl NluBackend for DialogflowClient {
    async fn detect_intent(&self, session_id: &str, text: &str, language_code: &str) -> NluResult<String> {
        let token = self.tokens.access_token().await?;
        let url = self.session_url(session_id);

        debug!(session_id = session_id, "Sending detectIntent request");

        let request = DetectIntentRequest {
            query_input: QueryInput {
                text: TextInput { text, language_code },
            },
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            self.tokens.invalidate().await;
            let body = response.text().await.unwrap_or_default();
            warn!(session_id = session_id, status = %status, "Dialogflow rejected credentials");
            return Err(NluError::Unauthorized(format!("{}: {}", status, body)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NluError::RequestFailed(format!("{}: {}", status, body)));
        }

        let body: DetectIntentResponse = response.json().await?;
        let result = body
            .query_result
            .ok_or_else(|| NluError::InvalidResponse("missing queryResult".to_string()))?;

        debug!(session_id = session_id, reply_length = result.fulfillment_text.len(), "Dialogflow replied");
        Ok(result.fulfillment_text)
    }
}
