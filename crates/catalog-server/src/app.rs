//! Application assembly and serving.

use crate::di::{build_catalog_module, ServiceResolver};
use crate::seed::seed_demo_data;
use axum::{routing::get, Router};
use catalog_config::{AppConfig, StoreBackend};
use catalog_core::{CatalogError, CatalogResult};
use catalog_repository::{create_pool, DatabasePool};
use catalog_rest::{create_router, AppState};
use catalog_service::metrics::register_metrics;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

/// A fully wired server, ready to bind.
pub struct Application {
    router: Router,
    addr: String,
    pool: Option<Arc<DatabasePool>>,
}

impl Application {
    /// Connects the store, builds the DI module, seeds demo data, and
    /// assembles the HTTP router.
    pub async fn build(config: &AppConfig) -> CatalogResult<Self> {
        let pool = match config.store.backend {
            StoreBackend::Mysql => {
                let pool = create_pool(&config.database).await?;
                pool.run_migrations().await?;
                Some(pool)
            }
            StoreBackend::Memory => None,
        };

        let module = build_catalog_module(config, pool.clone())?;

        if config.store.seed_demo_data {
            seed_demo_data(module.item_repository().as_ref()).await?;
        }

        let state = AppState::from_module(&module);

        let additional_routes = if config.observability.metrics_enabled {
            let handle = install_metrics_recorder()?;
            info!(path = %config.observability.metrics_path, "Prometheus metrics enabled");
            metrics_router(handle, &config.observability.metrics_path)
        } else {
            Router::new()
        };

        let router = create_router(state, &config.server, additional_routes);

        Ok(Self {
            router,
            addr: config.server.addr(),
            pool,
        })
    }

    /// Returns a clone of the HTTP router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serves until a shutdown signal arrives, then closes the store.
    pub async fn run(self) -> CatalogResult<()> {
        info!("Starting REST server on http://{}", self.addr);

        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .map_err(|e| CatalogError::Internal(format!("Failed to bind {}: {}", self.addr, e)))?;

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| CatalogError::Internal(format!("REST server error: {}", e)))?;

        if let Some(pool) = self.pool {
            pool.close().await;
        }

        info!("Server shutdown complete");
        Ok(())
    }
}

/// Installs the global Prometheus recorder and describes the catalog metrics.
pub fn install_metrics_recorder() -> CatalogResult<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| CatalogError::Internal(format!("Failed to install metrics recorder: {}", e)))?;
    register_metrics();
    Ok(handle)
}

/// Router exposing the Prometheus text format at `path`.
pub fn metrics_router(handle: PrometheusHandle, path: &str) -> Router {
    Router::new().route(path, get(move || std::future::ready(handle.render())))
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::{Request, StatusCode}};
    use catalog_config::TranslationProvider;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.translation.provider = TranslationProvider::Passthrough;
        config.observability.metrics_enabled = false;
        config
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_application_serves_seeded_items() {
        let app = Application::build(&test_config()).await.unwrap();

        let response = app
            .router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/items/group%23books")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["count"], 2);
    }

    #[tokio::test]
    async fn test_application_without_seed_is_empty() {
        let mut config = test_config();
        config.store.seed_demo_data = false;
        let app = Application::build(&config).await.unwrap();

        let response = app
            .router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/items/group%23games/item%231")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_metrics_router_renders_prometheus_text() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let router = metrics_router(handle, "/metrics");

        let response = router
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_metrics_endpoint_passes_through_cors_layer() {
        let mut config = test_config();
        config.observability.metrics_enabled = true;
        let app = Application::build(&config).await.unwrap();

        let response = app
            .router()
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .header("origin", "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }
}
