//! Dependency injection module using Shaku.
//!
//! `CatalogModule` registers the in-memory store and the LibreTranslate
//! client by default. The MySQL store and the passthrough translator are
//! swapped in with component overrides according to configuration.

use catalog_config::{AppConfig, StoreBackend, TranslationProvider};
use catalog_core::{CatalogError, CatalogResult};
use catalog_repository::{
    DatabasePool, InMemoryItemRepository, ItemRepository, MySqlItemRepository,
};
use catalog_service::{
    EngineSettings, ItemService, ItemServiceComponent, LibreTranslateTranslator,
    PassthroughTranslator, TranslationEngine, TranslationEngineComponent, Translator,
};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::info;

module! {
    pub CatalogModule {
        components = [
            InMemoryItemRepository,
            LibreTranslateTranslator,
            ItemServiceComponent,
            TranslationEngineComponent,
        ],
        providers = [],
    }
}

/// Builds the catalog module for the given configuration.
///
/// `pool` must be set when the MySQL backend is selected.
pub fn build_catalog_module(
    config: &AppConfig,
    pool: Option<Arc<DatabasePool>>,
) -> CatalogResult<CatalogModule> {
    let settings = EngineSettings::from_config(&config.translation)?;

    let mut builder = CatalogModule::builder()
        .with_component_parameters::<TranslationEngineComponent>(TranslationEngineComponent::parameters(settings));

    builder = match config.translation.provider {
        TranslationProvider::LibreTranslate => {
            let translator = LibreTranslateTranslator::new(&config.translation)?;
            info!(endpoint = %config.translation.endpoint, "Using LibreTranslate translator");
            builder.with_component_parameters::<LibreTranslateTranslator>(translator.into_parameters())
        }
        TranslationProvider::Passthrough => {
            info!("Using passthrough translator");
            builder.with_component_override::<dyn Translator>(Box::new(PassthroughTranslator))
        }
    };

    builder = match config.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory item store");
            builder
        }
        StoreBackend::Mysql => {
            let pool = pool.ok_or_else(|| {
                CatalogError::Configuration("MySQL backend selected but no pool was created".to_string())
            })?;
            info!("Using MySQL item store");
            builder.with_component_override::<dyn ItemRepository>(Box::new(MySqlItemRepository::new(pool)))
        }
    };

    Ok(builder.build())
}

/// Resolves the services the HTTP layer needs.
pub trait ServiceResolver {
    fn item_service(&self) -> Arc<dyn ItemService>;

    fn translation_engine(&self) -> Arc<dyn TranslationEngine>;

    fn item_repository(&self) -> Arc<dyn ItemRepository>;
}

impl ServiceResolver for CatalogModule {
    fn item_service(&self) -> Arc<dyn ItemService> {
        self.resolve()
    }

    fn translation_engine(&self) -> Arc<dyn TranslationEngine> {
        self.resolve()
    }

    fn item_repository(&self) -> Arc<dyn ItemRepository> {
        self.resolve()
    }
}
