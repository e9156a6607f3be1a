//! Server startup utilities.

use catalog_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ____       __            __      __
   / __ \____ / /_  ______ _/ /___  / /_
  / /_/ / __ \/ / / / / __ `/ / __ \/ __/
 / ____/ /_/ / / /_/ / /_/ / / /_/ / /_
/_/    \____/_/\__, /\__, /_/\____/\__/
              /____//____/   Catalog
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let port = config.server.port;
    info!("{}", separator);
    info!("REST API:    http://{}/api/v1", config.server.addr());
    info!("Health:      http://0.0.0.0:{}/health", port);
    info!("API Docs:    http://0.0.0.0:{}/swagger-ui", port);
    if config.observability.metrics_enabled {
        info!("Metrics:     http://0.0.0.0:{}{}", port, config.observability.metrics_path);
    }
    info!("Store:       {}", config.store.backend);
    info!("Translator:  {}", config.translation.provider);
    info!("{}", separator);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_banner_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_banner();
    }

    #[test]
    fn test_print_startup_info_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_startup_info(&AppConfig::default());
    }
}
