//! Google service account credentials and OAuth2 access tokens
//!
//! The service account JSON blob is read from an environment variable. Access
//! tokens are obtained with the JWT bearer grant: a claim set signed with the
//! account's RSA key is exchanged at the token endpoint, and the resulting
//! token is cached until shortly before it expires.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::utils::errors::{NluError, NluResult, RelayError, Result};

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const TOKEN_SCOPES: &str =
    "https://www.googleapis.com/auth/cloud-platform https://www.googleapis.com/auth/dialogflow";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const EXPIRY_MARGIN_SECS: i64 = 60;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// Fields of a Google service account key file used by the bot
#[derive(Clone, Deserialize)]
pub struct ServiceAccountCredentials {
    pub project_id: String,
    pub private_key: String,
    pub client_email: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountCredentials {
    /// Parse a service account key file
    pub fn from_json(json: &str) -> Result<Self> {
        let credentials: Self = serde_json::from_str(json)?;

        if credentials.project_id.is_empty() {
            return Err(RelayError::Credentials("project_id is empty".to_string()));
        }
        if credentials.client_email.is_empty() {
            return Err(RelayError::Credentials("client_email is empty".to_string()));
        }

        Ok(credentials)
    }

    /// Read the key file contents from the environment variable `var`
    pub fn from_env(var: &str) -> Result<Self> {
        let json = std::env::var(var)
            .map_err(|_| RelayError::Credentials(format!("environment variable {} is not set", var)))?;
        Self::from_json(&json)
    }
}

impl std::fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct AccessToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS) > now
    }
}

/// Issues and caches OAuth2 access tokens for a service account
pub struct TokenProvider {
    credentials: ServiceAccountCredentials,
    signing_key: EncodingKey,
    http_client: reqwest::Client,
    cached: tokio::sync::RwLock<Option<AccessToken>>,
}

impl TokenProvider {
    /// Create a provider, rejecting credentials whose private key is not an RSA PEM
    pub fn new(credentials: ServiceAccountCredentials, http_client: reqwest::Client) -> Result<Self> {
        let signing_key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes())?;

        Ok(Self {
            credentials,
            signing_key,
            http_client,
            cached: tokio::sync::RwLock::new(None),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.credentials.project_id
    }

    /// Get a valid access token, fetching a new one if the cached token is stale.
    ///
    /// The cache lock is never held across the token request: callers that
    /// miss the cache each fetch on their own, bounded by the client timeout.
    pub async fn access_token(&self) -> NluResult<String> {
        if let Some(token) = self.cached_token().await {
            return Ok(token);
        }

        let token = self.fetch_token().await?;
        let value = token.token.clone();
        *self.cached.write().await = Some(token);
        Ok(value)
    }

    async fn cached_token(&self) -> Option<String> {
        self.cached
            .read()
            .await
            .as_ref()
            .filter(|t| t.is_fresh(Utc::now()))
            .map(|t| t.token.clone())
    }

    /// Drop the cached token so the next call fetches a new one
    pub async fn invalidate(&self) {
        self.cached.write().await.take();
    }

    fn signed_assertion(&self, now: DateTime<Utc>) -> NluResult<String> {
        let iat = now.timestamp();
        let claims = Claims {
            iss: &self.credentials.client_email,
            scope: TOKEN_SCOPES,
            aud: &self.credentials.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.signing_key)
            .map_err(|e| NluError::Unauthorized(format!("failed to sign assertion: {}", e)))
    }

    async fn fetch_token(&self) -> NluResult<AccessToken> {
        let now = Utc::now();
        let assertion = self.signed_assertion(now)?;

        debug!(client_email = %self.credentials.client_email, "Requesting OAuth2 access token");

        let response = self
            .http_client
            .post(&self.credentials.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NluError::Unauthorized(format!("token endpoint returned {}: {}", status, body)));
        }

        let token: TokenResponse = response.json().await?;
        info!(expires_in = token.expires_in, "Obtained OAuth2 access token");

        Ok(AccessToken {
            token: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
