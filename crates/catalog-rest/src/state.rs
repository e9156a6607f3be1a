//! Application state for Axum handlers.

use catalog_core::HealthCheck;
use catalog_repository::{ItemRepository, StoreHealthCheck};
use catalog_service::{ItemService, TranslationEngine};
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub item_service: Arc<dyn ItemService>,
    pub translation_engine: Arc<dyn TranslationEngine>,
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        item_service: Arc<dyn ItemService>,
        translation_engine: Arc<dyn TranslationEngine>,
    ) -> Self {
        Self {
            item_service,
            translation_engine,
            health_checks: Vec::new(),
        }
    }

    /// Resolves services from a module and registers the store health check.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module
            + HasComponent<dyn ItemService>
            + HasComponent<dyn TranslationEngine>
            + HasComponent<dyn ItemRepository>,
    {
        let item_service: Arc<dyn ItemService> = module.resolve();
        let translation_engine: Arc<dyn TranslationEngine> = module.resolve();
        let repository: Arc<dyn ItemRepository> = module.resolve();

        Self::new(item_service, translation_engine)
            .with_health_check(Arc::new(StoreHealthCheck::new(repository)))
    }

    /// Adds a readiness check.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field(
                "health_checks",
                &self.health_checks.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
