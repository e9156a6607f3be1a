//! # Catalog Server
//!
//! Entry point for the polyglot catalog HTTP server.

use catalog_config::ConfigLoader;
use catalog_core::{init_telemetry, shutdown_telemetry, CatalogResult};
use catalog_server::{
    app::Application,
    startup::{print_banner, print_startup_info},
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // The subscriber may not be installed yet.
        eprintln!("Application error: {}", e);
        error!("Application error: {}", e);
        shutdown_telemetry();
        std::process::exit(1);
    }

    shutdown_telemetry();
}

async fn run() -> CatalogResult<()> {
    let config = ConfigLoader::from_default_location()?.into_config();

    init_telemetry(&config.observability.telemetry)?;
    print_banner();

    info!("Starting {} v{}", config.app.name, env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    let app = Application::build(&config).await?;
    print_startup_info(&config);

    app.run().await
}
