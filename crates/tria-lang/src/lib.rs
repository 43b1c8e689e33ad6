//! Core library surface for the tria language services crate.
mod http;
mod types;

pub use http::{LanguageHttpClient, LanguageHttpConfig};
pub use types::{DetectedLanguage, LangError, LanguageDetector, Translator, WORKING_LANGUAGE};
