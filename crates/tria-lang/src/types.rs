use async_trait::async_trait;
use thiserror::Error;

/// Canonical language all ticket text is normalized into before
/// classification and dispatch.
pub const WORKING_LANGUAGE: &str = "en";

#[derive(Debug, Error)]
/// Enumerates supported `LangError` values.
pub enum LangError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("language service returned non-success status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, PartialEq)]
/// One entry of the ranked detection output.
pub struct DetectedLanguage {
    pub language_code: String,
    pub score: f64,
}

#[async_trait]
/// Trait contract for dominant-language detection.
pub trait LanguageDetector: Send + Sync {
    /// Returns the single most probable language of `text`.
    async fn detect_dominant_language(&self, text: &str) -> Result<DetectedLanguage, LangError>;
}

#[async_trait]
/// Trait contract for text translation.
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source_language_code: &str,
        target_language_code: &str,
    ) -> Result<String, LangError>;
}
