//! Logging and distributed tracing setup.
//!
//! Console logging (pretty or JSON) is always available. OpenTelemetry
//! export over OTLP is compiled in with the `telemetry` feature and switched
//! on by configuration.

use crate::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Console log format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Whether OpenTelemetry export is enabled.
    #[serde(default)]
    pub enabled: bool,

    /// Service name for tracing.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// OTLP endpoint URL (e.g., "http://localhost:4317").
    #[serde(default)]
    pub otlp_endpoint: Option<String>,

    /// Sampling ratio (0.0 to 1.0).
    #[serde(default = "default_sampling_ratio")]
    pub sampling_ratio: f64,

    /// Whether to enable console output.
    #[serde(default = "default_console_output")]
    pub console_output: bool,

    /// Console log format.
    #[serde(default)]
    pub log_format: LogFormat,

    /// Default filter directives; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_service_name() -> String {
    "polyglot-catalog".to_string()
}

const fn default_sampling_ratio() -> f64 {
    1.0
}

const fn default_console_output() -> bool {
    true
}

fn default_log_filter() -> String {
    "info,catalog=debug,tower_http=debug".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            service_name: default_service_name(),
            otlp_endpoint: None,
            sampling_ratio: default_sampling_ratio(),
            console_output: default_console_output(),
            log_format: LogFormat::default(),
            log_filter: default_log_filter(),
        }
    }
}

/// Installs the global tracing subscriber.
///
/// Fails if a global subscriber is already set or the OTLP exporter cannot
/// be built.
pub fn init_telemetry(config: &TelemetryConfig) -> CatalogResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let fmt_layer = config.console_output.then(|| match config.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt::layer().with_target(true).boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed(),
    });

    #[cfg(feature = "telemetry")]
    let otel_layer = otlp::layer(config)?;

    #[cfg(not(feature = "telemetry"))]
    let otel_layer: Option<tracing_subscriber::layer::Identity> = None;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .map_err(|e| CatalogError::Internal(format!("Failed to install tracing subscriber: {}", e)))?;

    #[cfg(not(feature = "telemetry"))]
    if config.enabled {
        tracing::warn!("Telemetry requested but the `telemetry` feature is not compiled in");
    }

    tracing::info!(
        service_name = %config.service_name,
        log_format = ?config.log_format,
        otel_enabled = config.enabled,
        "Logging initialized"
    );

    Ok(())
}

/// Shutdown telemetry, flushing any pending spans.
#[cfg(feature = "telemetry")]
pub fn shutdown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
    tracing::info!("Telemetry shutdown complete");
}

/// Placeholder for when telemetry feature is disabled.
#[cfg(not(feature = "telemetry"))]
pub fn shutdown_telemetry() {}

#[cfg(feature = "telemetry")]
mod otlp {
    use super::TelemetryConfig;
    use crate::{CatalogError, CatalogResult};
    use opentelemetry::{trace::TracerProvider as _, KeyValue};
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::{
        runtime,
        trace::{RandomIdGenerator, Sampler, Tracer, TracerProvider},
        Resource,
    };
    use opentelemetry_semantic_conventions::resource::SERVICE_NAME;
    use tracing::Subscriber;
    use tracing_opentelemetry::OpenTelemetryLayer;
    use tracing_subscriber::registry::LookupSpan;

    pub(super) fn layer<S>(
        config: &TelemetryConfig,
    ) -> CatalogResult<Option<OpenTelemetryLayer<S, Tracer>>>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        if !config.enabled {
            return Ok(None);
        }

        let sampler = if config.sampling_ratio >= 1.0 {
            Sampler::AlwaysOn
        } else if config.sampling_ratio <= 0.0 {
            Sampler::AlwaysOff
        } else {
            Sampler::TraceIdRatioBased(config.sampling_ratio)
        };

        let resource = Resource::new(vec![KeyValue::new(
            SERVICE_NAME,
            config.service_name.clone(),
        )]);

        let builder = TracerProvider::builder()
            .with_sampler(sampler)
            .with_id_generator(RandomIdGenerator::default())
            .with_resource(resource);

        let provider = if let Some(endpoint) = &config.otlp_endpoint {
            let exporter = opentelemetry_otlp::SpanExporter::builder()
                .with_tonic()
                .with_endpoint(endpoint)
                .build()
                .map_err(|e| {
                    CatalogError::Internal(format!("Failed to create OTLP exporter: {}", e))
                })?;
            builder.with_batch_exporter(exporter, runtime::Tokio).build()
        } else {
            builder.build()
        };

        let tracer = provider.tracer(config.service_name.clone());
        opentelemetry::global::set_tracer_provider(provider);

        Ok(Some(tracing_opentelemetry::layer().with_tracer(tracer)))
    }
}
