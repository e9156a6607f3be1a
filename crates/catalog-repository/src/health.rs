//! Store readiness check.

use crate::ItemRepository;
use async_trait::async_trait;
use catalog_core::{HealthCheck, HealthStatus};
use std::sync::Arc;

/// Reports whether the item store answers.
pub struct StoreHealthCheck {
    repository: Arc<dyn ItemRepository>,
}

impl StoreHealthCheck {
    /// Creates a health check for the given store.
    #[must_use]
    pub fn new(repository: Arc<dyn ItemRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl HealthCheck for StoreHealthCheck {
    fn name(&self) -> &str {
        "item_store"
    }

    async fn check(&self) -> HealthStatus {
        match self.repository.health_check().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }
}
