use crate::config::XConfig;
use crate::errors::{ApiError, ApiResult, AppError, AppResult};
use crate::notify::oauth::OAuthCredentials;
use crate::notify::Publisher;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
struct CreatePostRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatePostResponse {
    data: CreatedPost,
}

#[derive(Debug, Deserialize)]
struct CreatedPost {
    id: String,
}

/// Posts alerts to X through the v2 `POST /2/tweets` endpoint (OAuth 1.0a user context)
pub struct XPublisher {
    http: Client,
    endpoint: String,
    credentials: OAuthCredentials,
}

impl XPublisher {
    /// Build from configuration; every credential must be present
    pub fn from_config(config: &XConfig, timeout_seconds: u64) -> AppResult<Self> {
        let missing = config.missing_credentials();
        if !missing.is_empty() {
            return Err(AppError::Config(format!(
                "Live mode needs X credentials; missing {}",
                missing.join(", ")
            )));
        }

        let credentials = OAuthCredentials {
            consumer_key: config.consumer_key.clone(),
            consumer_secret: config.consumer_secret.clone(),
            access_token: config.access_token.clone(),
            access_token_secret: config.access_token_secret.clone(),
        };
        Ok(Self::new(credentials, &config.api_url, timeout_seconds)?)
    }

    pub fn new(
        credentials: OAuthCredentials,
        api_url: &str,
        timeout_seconds: u64,
    ) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| ApiError::ClientSetup(e.to_string()))?;

        info!("X client initialised");
        Ok(Self {
            http,
            endpoint: format!("{}/2/tweets", api_url.trim_end_matches('/')),
            credentials,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn create_post(&self, text: &str) -> ApiResult<String> {
        let authorization = self
            .credentials
            .authorization_header("POST", &self.endpoint, &[])?;

        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, authorization)
            .json(&CreatePostRequest { text })
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ApiError::RequestFailed {
                url: self.endpoint.clone(),
                message: e.to_string(),
            })?;

        let created: CreatePostResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Unexpected post response: {}", e)))?;
        Ok(created.data.id)
    }
}

#[async_trait]
impl Publisher for XPublisher {
    fn name(&self) -> &str {
        "x"
    }

    async fn send(&self, _title: &str, message: &str) -> bool {
        match self.create_post(message).await {
            Ok(id) => {
                info!("Post published! ID: {}", id);
                true
            }
            Err(e) => {
                warn!("Failed to post to X: {}", e);
                false
            }
        }
    }
}
