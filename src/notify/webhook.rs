use crate::errors::{ApiError, ApiResult};
use crate::notify::Publisher;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    title: &'a str,
    content: &'a str,
}

/// Publishes alerts as JSON POSTs to a list of webhook URLs
///
/// The payload carries `content` (the Discord field) and `title`, which most
/// chat webhooks accept. Delivery succeeds if at least one target accepted.
pub struct WebhookPublisher {
    http: Client,
    targets: Vec<String>,
}

impl WebhookPublisher {
    pub fn new(targets: Vec<String>, timeout_seconds: u64) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| ApiError::ClientSetup(e.to_string()))?;

        info!("Webhook publisher enabled with {} target(s)", targets.len());
        Ok(Self { http, targets })
    }

    pub fn is_enabled(&self) -> bool {
        !self.targets.is_empty()
    }

    async fn post(&self, target: &str, payload: &WebhookPayload<'_>) -> ApiResult<()> {
        self.http
            .post(target)
            .json(payload)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ApiError::RequestFailed {
                url: target.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }
}

#[async_trait]
impl Publisher for WebhookPublisher {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn send(&self, title: &str, message: &str) -> bool {
        if !self.is_enabled() {
            return false;
        }

        let payload = WebhookPayload {
            title,
            content: message,
        };

        let mut delivered = 0;
        for target in &self.targets {
            match self.post(target, &payload).await {
                Ok(()) => delivered += 1,
                Err(e) => warn!("Webhook delivery failed: {}", e),
            }
        }

        if delivered > 0 {
            info!("Webhook alert delivered to {}/{} targets", delivered, self.targets.len());
        }
        delivered > 0
    }
}
