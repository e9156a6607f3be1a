//! Translator capability.
//!
//! The engine only needs "translate this text into that language"; the
//! backend behind it is chosen at wiring time.

use async_trait::async_trait;
use catalog_core::{CatalogResult, Interface, LanguageCode, SourceLanguage};
use shaku::Component;
use tracing::debug;

/// One translation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    /// Text to translate.
    pub text: String,
    /// Source language, or auto-detect.
    pub source: SourceLanguage,
    /// Target language.
    pub target: LanguageCode,
}

impl TranslateRequest {
    /// Creates a request that lets the backend detect the source language.
    #[must_use]
    pub fn auto(text: impl Into<String>, target: LanguageCode) -> Self {
        Self {
            text: text.into(),
            source: SourceLanguage::Auto,
            target,
        }
    }
}

/// Machine translation backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Interface + Send + Sync {
    /// Translates the request text into the target language.
    async fn translate(&self, request: TranslateRequest) -> CatalogResult<String>;
}

/// Translator that returns its input unchanged.
///
/// Used for local development when no translation backend is running.
#[derive(Component, Debug, Default, Clone, Copy)]
#[shaku(interface = Translator)]
pub struct PassthroughTranslator;

#[async_trait]
impl Translator for PassthroughTranslator {
    async fn translate(&self, request: TranslateRequest) -> CatalogResult<String> {
        debug!(target_language = %request.target, "Passthrough translation");
        Ok(request.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_passthrough_returns_input() {
        let translator = PassthroughTranslator;
        let request = TranslateRequest::auto("Intro", LanguageCode::parse("fr").unwrap());
        assert_eq!(translator.translate(request).await.unwrap(), "Intro");
    }

    #[test]
    fn test_auto_request_uses_detection() {
        let request = TranslateRequest::auto("Hello", LanguageCode::parse("DE").unwrap());
        assert_eq!(request.source, SourceLanguage::Auto);
        assert_eq!(request.target.as_str(), "de");
    }
}
