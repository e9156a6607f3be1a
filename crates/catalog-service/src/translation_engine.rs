//! Translation cache engine trait definition.

use async_trait::async_trait;
use catalog_config::TranslationConfig;
use catalog_core::{CatalogResult, Interface, LanguageCode, TranslatedView};
use catalog_resilience::RetryPolicy;
use std::time::Duration;

/// Cache-aside translation of an item's text fields.
#[async_trait]
pub trait TranslationEngine: Interface + Send + Sync {
    /// Returns the item projected into `language`, or the configured default
    /// language when none is given.
    ///
    /// A cached view is returned as stored. On a miss the view is computed,
    /// written back into the item's cache, and returned even if the write
    /// fails. Translator failures never surface; the affected field keeps its
    /// source text.
    async fn get_translated(
        &self,
        group_key: &str,
        item_key: &str,
        language: Option<&str>,
    ) -> CatalogResult<TranslatedView>;
}

/// Runtime settings for the engine.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Language used when the caller names none.
    pub default_language: LanguageCode,
    /// Bound on each translator call.
    pub translate_timeout: Duration,
    /// Retry policy for each field.
    pub retry: RetryPolicy,
    /// Condition cache writes on the content version that was translated.
    pub conditional_cache_writes: bool,
}

impl EngineSettings {
    /// Builds engine settings from the translation configuration.
    pub fn from_config(config: &TranslationConfig) -> CatalogResult<Self> {
        Ok(Self {
            default_language: config.default_language()?,
            translate_timeout: config.timeout(),
            retry: RetryPolicy::with_max_attempts(config.max_attempts)
                .with_initial_delay(config.retry_backoff()),
            conditional_cache_writes: config.conditional_cache_writes,
        })
    }
}
