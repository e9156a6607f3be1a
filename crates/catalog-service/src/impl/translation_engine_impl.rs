//! Translation cache engine implementation.

use crate::metrics::TranslationMetrics;
use crate::translation_engine::{EngineSettings, TranslationEngine};
use crate::translator::{TranslateRequest, Translator};
use async_trait::async_trait;
use catalog_core::{
    CatalogError, CatalogResult, Item, ItemId, ItemUpdate, LanguageCode, TranslatedView,
    UpdateCondition, UpdateOutcome,
};
use catalog_repository::ItemRepository;
use catalog_resilience::with_timeout;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Cache-aside translation engine component for Shaku DI.
///
/// Holds no state of its own between requests; the item's `translations`
/// map in the store is the only cache.
#[derive(Component)]
#[shaku(interface = TranslationEngine)]
pub struct TranslationEngineComponent {
    #[shaku(inject)]
    item_repository: Arc<dyn ItemRepository>,
    #[shaku(inject)]
    translator: Arc<dyn Translator>,
    settings: EngineSettings,
}

impl TranslationEngineComponent {
    /// Creates an engine without going through a module.
    pub fn new(
        item_repository: Arc<dyn ItemRepository>,
        translator: Arc<dyn Translator>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            item_repository,
            translator,
            settings,
        }
    }

    /// Returns the shaku parameters for an engine with these settings.
    #[must_use]
    pub fn parameters(settings: EngineSettings) -> TranslationEngineComponentParameters {
        TranslationEngineComponentParameters { settings }
    }

    fn resolve_language(&self, language: Option<&str>) -> CatalogResult<LanguageCode> {
        match language.map(str::trim).filter(|l| !l.is_empty()) {
            Some(raw) => LanguageCode::parse(raw),
            None => Ok(self.settings.default_language.clone()),
        }
    }

    /// Translates one field, falling back to the source text on any failure.
    async fn translate_field(
        &self,
        field: &'static str,
        source: Option<&str>,
        language: &LanguageCode,
    ) -> Option<String> {
        let text = match source {
            Some(text) if !text.is_empty() => text,
            other => return other.map(str::to_string),
        };

        let translator = &self.translator;
        let timeout = self.settings.translate_timeout;
        let result = self
            .settings
            .retry
            .execute(|| {
                let request = TranslateRequest::auto(text, language.clone());
                with_timeout(timeout, move || translator.translate(request))
            })
            .await;

        match result {
            Ok(translated) if !translated.trim().is_empty() => Some(translated),
            Ok(_) => {
                warn!(field, language = %language, "Translator returned empty text; keeping source");
                TranslationMetrics::degraded(language.as_str(), field);
                Some(text.to_string())
            }
            Err(e) => {
                warn!(field, language = %language, error = %e, "Translation failed; keeping source");
                TranslationMetrics::degraded(language.as_str(), field);
                Some(text.to_string())
            }
        }
    }

    async fn compute_view(&self, item: &Item, language: LanguageCode) -> TranslatedView {
        let (title, description) = futures::join!(
            self.translate_field("title", item.title.as_deref(), &language),
            self.translate_field("description", item.description.as_deref(), &language),
        );
        TranslatedView::from_item(item, language, title, description)
    }

    /// Writes the view into the item's cache. Failures are logged only.
    async fn persist(&self, id: &ItemId, item: &Item, view: &TranslatedView) {
        let condition = self
            .settings
            .conditional_cache_writes
            .then_some(UpdateCondition::ContentVersion(item.content_version));
        let update = ItemUpdate::cache_translation(view.clone());

        match self
            .item_repository
            .update_fields(id, &update, condition.as_ref())
            .await
        {
            Ok(UpdateOutcome::Applied) => {
                info!(item = %id, language = %view.language, "Translation cached");
            }
            Ok(UpdateOutcome::ConditionFailed) => {
                warn!(
                    item = %id,
                    language = %view.language,
                    read_version = item.content_version,
                    "Item changed while translating; cache entry dropped"
                );
                TranslationMetrics::persist_failed("stale");
            }
            Err(e) => {
                warn!(item = %id, language = %view.language, error = %e, "Failed to cache translation");
                TranslationMetrics::persist_failed("store_error");
            }
        }
    }
}

#[async_trait]
impl TranslationEngine for TranslationEngineComponent {
    async fn get_translated(
        &self,
        group_key: &str,
        item_key: &str,
        language: Option<&str>,
    ) -> CatalogResult<TranslatedView> {
        let id = ItemId::parse(group_key, item_key)?;
        let language = self.resolve_language(language)?;
        debug!(item = %id, language = %language, "Getting translated item");

        let item = self
            .item_repository
            .find(&id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Item", &id))?;

        if let Some(cached) = item.cached_translation(&language) {
            debug!(item = %id, language = %language, "Translation cache hit");
            TranslationMetrics::cache_hit(language.as_str());
            return Ok(cached.clone());
        }

        TranslationMetrics::cache_miss(language.as_str());
        let view = self.compute_view(&item, language).await;
        self.persist(&id, &item, &view).await;

        Ok(view)
    }
}

impl std::fmt::Debug for TranslationEngineComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationEngineComponent")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
