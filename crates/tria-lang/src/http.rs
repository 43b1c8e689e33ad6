use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{DetectedLanguage, LangError, LanguageDetector, Translator};

#[derive(Debug, Clone)]
/// Configuration for the language detection/translation HTTP client.
pub struct LanguageHttpConfig {
    pub api_base: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone)]
/// One client implementing both language collaborators; detection and
/// translation live behind sibling endpoints on the same service.
pub struct LanguageHttpClient {
    client: reqwest::Client,
    config: LanguageHttpConfig,
}

impl LanguageHttpClient {
    pub fn new(config: LanguageHttpConfig) -> Result<Self, LangError> {
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

    fn endpoint(&self, path: &str) -> String {
        let base = self.config.api_base.trim_end_matches('/');
        format!("{base}/{path}")
    }

    async fn post_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, LangError> {
        let response = self.client.post(self.endpoint(path)).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(LangError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await?;
        serde_json::from_str(&raw)
            .map_err(|error| LangError::InvalidResponse(format!("failed to parse {path}: {error}")))
    }
}

#[derive(Debug, Deserialize)]
struct DetectResponse {
    languages: Vec<DetectEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetectEntry {
    language_code: String,
    #[serde(default)]
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

#[async_trait]
impl LanguageDetector for LanguageHttpClient {
    async fn detect_dominant_language(&self, text: &str) -> Result<DetectedLanguage, LangError> {
        let parsed: DetectResponse = self
            .post_json("detect", json!({ "text": text }))
            .await?;

        // Only the top-ranked entry is used.
        let top = parsed.languages.into_iter().next().ok_or_else(|| {
            LangError::InvalidResponse("detection returned an empty language ranking".to_string())
        })?;

        info!(language = %top.language_code, "detected dominant language");
        Ok(DetectedLanguage {
            language_code: top.language_code,
            score: top.score,
        })
    }
}

#[async_trait]
impl Translator for LanguageHttpClient {
    async fn translate(
        &self,
        text: &str,
        source_language_code: &str,
        target_language_code: &str,
    ) -> Result<String, LangError> {
        let parsed: TranslateResponse = self
            .post_json(
                "translate",
                json!({
                    "text": text,
                    "sourceLanguageCode": source_language_code,
                    "targetLanguageCode": target_language_code,
                }),
            )
            .await?;

        info!(
            source = %source_language_code,
            target = %target_language_code,
            "translation complete"
        );
        Ok(parsed.translated_text)
    }
}
