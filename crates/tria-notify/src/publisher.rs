use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{NotifyError, PublishRequest, TopicPublisher};

#[derive(Debug, Clone)]
/// Configuration for the notification topic publisher.
pub struct TopicHttpPublisherConfig {
    pub api_base: String,
    pub topic_arn: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone)]
/// HTTP publisher for the pub/sub notification topic.
pub struct TopicHttpPublisher {
    client: reqwest::Client,
    config: TopicHttpPublisherConfig,
}

impl TopicHttpPublisher {
    pub fn new(config: TopicHttpPublisherConfig) -> Result<Self, NotifyError> {
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

    fn publish_url(&self) -> String {
        let base = self.config.api_base.trim_end_matches('/');
        format!("{base}/publish")
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublishResponse {
    message_id: String,
}

#[async_trait]
impl TopicPublisher for TopicHttpPublisher {
    async fn publish(&self, request: PublishRequest) -> Result<String, NotifyError> {
        let attributes: serde_json::Map<String, serde_json::Value> = request
            .attributes
            .into_iter()
            .map(|(key, value)| {
                (
                    key,
                    json!({ "dataType": "String", "stringValue": value }),
                )
            })
            .collect();

        let response = self
            .client
            .post(self.publish_url())
            .json(&json!({
                "topicArn": self.config.topic_arn,
                "subject": request.subject,
                "message": request.message,
                "messageAttributes": attributes,
            }))
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

        let raw = response.text().await?;
        let parsed: PublishResponse = serde_json::from_str(&raw).map_err(|error| {
            NotifyError::InvalidResponse(format!("failed to parse publish response: {error}"))
        })?;

        info!(message_id = %parsed.message_id, "notification published");
        Ok(parsed.message_id)
    }
}
