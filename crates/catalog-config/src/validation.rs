//! Configuration validation.
//!
//! Collects every problem in one pass so startup fails with the full list.

use crate::{
    AppConfig, DatabaseConfig, ObservabilityConfig, ServerConfig, StoreBackend, TranslationConfig,
    TranslationProvider,
};
use catalog_core::LanguageCode;
use thiserror::Error;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    /// Port number is invalid.
    #[error("Invalid port for {name}: {value} (must be 1-65535)")]
    InvalidPort { name: String, value: u16 },

    /// Pool size configuration is invalid (min must be <= max).
    #[error("Invalid pool size: min ({min}) cannot be greater than max ({max})")]
    InvalidPoolSize { min: u32, max: u32 },

    /// Pool size exceeds maximum allowed.
    #[error("Pool size {value} exceeds maximum allowed ({maximum})")]
    PoolSizeTooLarge { value: u32, maximum: u32 },

    /// URL format is invalid.
    #[error("Invalid {url_type} URL: {message}")]
    InvalidUrl { url_type: String, message: String },

    /// Sampling ratio must be between 0.0 and 1.0.
    #[error("Invalid sampling ratio: {value} (must be between 0.0 and 1.0)")]
    InvalidSamplingRatio { value: f64 },

    /// Timeout value must be positive.
    #[error("Timeout '{name}' must be positive, got {value}")]
    NonPositiveTimeout { name: String, value: u64 },

    /// Default language does not parse.
    #[error("Invalid default language '{value}'")]
    InvalidLanguage { value: String },

    /// Retry attempts must be at least one.
    #[error("translation.max_attempts must be at least 1, got {value}")]
    InvalidAttempts { value: u32 },

    /// Metrics path must be an absolute route.
    #[error("Invalid metrics path '{value}' (must start with '/')")]
    InvalidMetricsPath { value: String },
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Maximum connection pool size.
    const MAX_POOL_SIZE: u32 = 1000;

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_server(&config.server, &mut errors);
        if config.store.backend == StoreBackend::Mysql {
            Self::validate_database(&config.database, &mut errors);
        }
        Self::validate_translation(&config.translation, &mut errors);
        Self::validate_observability(&config.observability, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(config: &ServerConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: config.port,
            });
        }

        if config.request_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "server.request_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_database(config: &DatabaseConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.url.is_empty() {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: "URL cannot be empty".to_string(),
            });
        } else if !config.url.starts_with("mysql://") {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: "URL must start with mysql://".to_string(),
            });
        }

        if config.min_connections > config.max_connections {
            errors.push(ConfigValidationError::InvalidPoolSize {
                min: config.min_connections,
                max: config.max_connections,
            });
        }
        if config.max_connections > Self::MAX_POOL_SIZE {
            errors.push(ConfigValidationError::PoolSizeTooLarge {
                value: config.max_connections,
                maximum: Self::MAX_POOL_SIZE,
            });
        }

        if config.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "database.connect_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_translation(config: &TranslationConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.provider == TranslationProvider::LibreTranslate {
            match Url::parse(&config.endpoint) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                Ok(url) => errors.push(ConfigValidationError::InvalidUrl {
                    url_type: "translation.endpoint".to_string(),
                    message: format!("unsupported scheme '{}'", url.scheme()),
                }),
                Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                    url_type: "translation.endpoint".to_string(),
                    message: format!("{}: {}", config.endpoint, e),
                }),
            }
        }

        if LanguageCode::parse(&config.default_language).is_err() {
            errors.push(ConfigValidationError::InvalidLanguage {
                value: config.default_language.clone(),
            });
        }

        if config.timeout_ms == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "translation.timeout_ms".to_string(),
                value: 0,
            });
        }

        if config.max_attempts == 0 {
            errors.push(ConfigValidationError::InvalidAttempts {
                value: config.max_attempts,
            });
        }
    }

    fn validate_observability(config: &ObservabilityConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.metrics_enabled && !config.metrics_path.starts_with('/') {
            errors.push(ConfigValidationError::InvalidMetricsPath {
                value: config.metrics_path.clone(),
            });
        }

        let telemetry = &config.telemetry;
        if !(0.0..=1.0).contains(&telemetry.sampling_ratio) {
            errors.push(ConfigValidationError::InvalidSamplingRatio {
                value: telemetry.sampling_ratio,
            });
        }

        if let Some(endpoint) = &telemetry.otlp_endpoint {
            if Url::parse(endpoint).is_err() {
                errors.push(ConfigValidationError::InvalidUrl {
                    url_type: "otlp_endpoint".to_string(),
                    message: format!("Invalid URL format: {}", endpoint),
                });
            }
        }
    }
}

/// Formats validation errors for display.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("\n  {}. {}", i + 1, error));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes() {
        assert!(ConfigValidator::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_database_only_checked_for_mysql_backend() {
        let mut config = AppConfig::default();
        config.database.url = String::new();
        assert!(ConfigValidator::validate(&config).is_ok());

        config.store.backend = StoreBackend::Mysql;
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigValidationError::InvalidUrl { url_type, .. } if url_type == "database")));
    }

    #[test]
    fn test_translation_endpoint_must_be_http() {
        let mut config = AppConfig::default();
        config.translation.endpoint = "ftp://translate.local".to_string();
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("unsupported scheme"));

        config.translation.endpoint = "not a url".to_string();
        assert!(ConfigValidator::validate(&config).is_err());

        config.translation.provider = TranslationProvider::Passthrough;
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_collects_all_translation_errors() {
        let mut config = AppConfig::default();
        config.translation.default_language = "-x".to_string();
        config.translation.timeout_ms = 0;
        config.translation.max_attempts = 0;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ConfigValidationError::InvalidAttempts { value: 0 }));

        let report = format_validation_errors(&errors);
        assert!(report.starts_with("Configuration validation failed:"));
        assert!(report.contains("3. "));
    }

    #[test]
    fn test_invalid_sampling_ratio_and_metrics_path() {
        let mut config = AppConfig::default();
        config.observability.telemetry.sampling_ratio = 1.5;
        config.observability.metrics_path = "metrics".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
