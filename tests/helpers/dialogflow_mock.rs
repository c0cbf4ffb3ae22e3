//! Mock Dialogflow API server for testing
//!
//! This module provides a mock HTTP server that simulates the Google OAuth2
//! token endpoint and the Dialogflow `detectIntent` endpoint. It uses
//! wiremock to create configurable mock responses.

use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path, path_regex},
    Mock, MockServer, ResponseTemplate,
};

use RelayBot::config::{NluConfig, Settings};
use RelayBot::services::{DialogflowClient, ServiceAccountCredentials};

pub const TEST_PROJECT_ID: &str = "relay-test-project";
pub const TEST_ACCESS_TOKEN: &str = "ya29.test-access-token";

/// Mock Dialogflow server for testing
pub struct DialogflowMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub status: u16,
    pub delay_ms: Option<u64>,
    pub custom_response: Option<Value>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            status: 200,
            delay_ms: None,
            custom_response: None,
        }
    }
}

impl MockResponseConfig {
    fn into_template(self, default_body: Value) -> ResponseTemplate {
        let body = self.custom_response.unwrap_or(default_body);
        let mut response = ResponseTemplate::new(self.status).set_body_json(body);

        if let Some(delay) = self.delay_ms {
            response = response.set_delay(std::time::Duration::from_millis(delay));
        }

        response
    }
}

impl DialogflowMockServer {
    /// Create a new mock Dialogflow server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    pub fn token_uri(&self) -> String {
        format!("{}/token", self.server.uri())
    }

    /// NLU settings pointing at this server
    pub fn nlu_config(&self) -> NluConfig {
        let mut config = Settings::default().nlu;
        config.base_url = self.server.uri();
        config.timeout_seconds = 2;
        config
    }

    /// Service account credentials whose token endpoint is this server
    pub fn credentials(&self) -> ServiceAccountCredentials {
        ServiceAccountCredentials::from_json(&self.credentials_json())
            .expect("test credentials should parse")
    }

    pub fn credentials_json(&self) -> String {
        json!({
            "type": "service_account",
            "project_id": TEST_PROJECT_ID,
            "private_key": include_str!("test_service_account_key.pem"),
            "client_email": "relay-bot@relay-test-project.iam.gserviceaccount.com",
            "token_uri": self.token_uri(),
        })
        .to_string()
    }

    pub fn client(&self) -> DialogflowClient {
        DialogflowClient::new(&self.nlu_config(), self.credentials())
            .expect("client should build")
    }

    /// Setup mock for the OAuth2 token endpoint, expecting `times` calls
    pub async fn mock_token(&self, config: MockResponseConfig, times: u64) {
        let response = config.into_template(json!({
            "access_token": TEST_ACCESS_TOKEN,
            "expires_in": 3599,
            "token_type": "Bearer"
        }));

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(response)
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Setup mock for detectIntent returning `fulfillment_text` for any session
    pub async fn mock_detect_intent(&self, fulfillment_text: &str, config: MockResponseConfig) {
        let response = config.into_template(json!({
            "responseId": "response-1",
            "queryResult": {
                "queryText": "ignored",
                "fulfillmentText": fulfillment_text,
                "languageCode": "en"
            }
        }));

        Mock::given(method("POST"))
            .and(path_regex(format!(
                r"^/v2/projects/{}/agent/sessions/[^/]+:detectIntent$",
                TEST_PROJECT_ID
            )))
            .and(header("authorization", format!("Bearer {}", TEST_ACCESS_TOKEN).as_str()))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Setup the usual successful token + detectIntent pair
    pub async fn setup_default_mocks(&self, fulfillment_text: &str) {
        self.mock_token(MockResponseConfig::default(), 1).await;
        self.mock_detect_intent(fulfillment_text, MockResponseConfig::default()).await;
    }

    /// Bodies of all detectIntent requests received so far
    pub async fn detect_intent_requests(&self) -> Vec<(String, Value)> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path().ends_with(":detectIntent"))
            .map(|r| {
                let body = serde_json::from_slice(&r.body).unwrap_or(Value::Null);
                (r.url.path().to_string(), body)
            })
            .collect()
    }
}
