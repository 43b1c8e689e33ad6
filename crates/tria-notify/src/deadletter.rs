use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::{json, Value};
use tracing::info;

use crate::{DeadLetterSink, NotifyError};

#[derive(Debug, Clone)]
/// Configuration for the dead-letter queue client.
pub struct DeadLetterHttpQueueConfig {
    pub queue_url: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone)]
/// HTTP client for the dead-letter queue. Enqueue is best-effort; the caller
/// decides what to do with a failure (in practice: log and move on).
pub struct DeadLetterHttpQueue {
    client: reqwest::Client,
    config: DeadLetterHttpQueueConfig,
}

impl DeadLetterHttpQueue {
    pub fn new(config: DeadLetterHttpQueueConfig) -> Result<Self, NotifyError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_millis(
                config.request_timeout_ms.max(1),
            ))
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl DeadLetterSink for DeadLetterHttpQueue {
    async fn enqueue(&self, message_body: Value) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.config.queue_url)
            .json(&json!({ "messageBody": message_body.to_string() }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(NotifyError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        info!("event pushed to dead-letter queue");
        Ok(())
    }
}
