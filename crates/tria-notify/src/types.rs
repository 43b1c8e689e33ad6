use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
/// Enumerates supported `NotifyError` values.
pub enum NotifyError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("notification service returned non-success status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, PartialEq)]
/// One topic publish: subject, body, and string-typed message attributes.
pub struct PublishRequest {
    pub subject: String,
    pub message: String,
    pub attributes: BTreeMap<String, String>,
}

#[async_trait]
/// Trait contract for the notification topic. Fire-once; callers never retry.
pub trait TopicPublisher: Send + Sync {
    /// Publishes one message and returns the provider's message identifier.
    async fn publish(&self, request: PublishRequest) -> Result<String, NotifyError>;
}

#[async_trait]
/// Trait contract for the dead-letter queue. Best-effort by contract: callers
/// inspect and log the result but never let it replace the primary error.
pub trait DeadLetterSink: Send + Sync {
    async fn enqueue(&self, message_body: Value) -> Result<(), NotifyError>;
}
