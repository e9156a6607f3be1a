//! LibreTranslate-compatible HTTP translator.

use crate::translator::{TranslateRequest, Translator};
use async_trait::async_trait;
use catalog_config::TranslationConfig;
use catalog_core::{CatalogError, CatalogResult};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use shaku::Component;
use tracing::debug;

const SERVICE_NAME: &str = "translator";

/// Translator backed by a LibreTranslate `/translate` endpoint.
#[derive(Component)]
#[shaku(interface = Translator)]
pub struct LibreTranslateTranslator {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl LibreTranslateTranslator {
    /// Creates a translator from configuration.
    ///
    /// The configured timeout also bounds each HTTP request.
    pub fn new(config: &TranslationConfig) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CatalogError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, &config.endpoint, config.api_key.clone()))
    }

    /// Creates a translator with a preconfigured client.
    #[must_use]
    pub fn with_client(client: Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Returns the shaku parameters for this translator.
    #[must_use]
    pub fn into_parameters(self) -> LibreTranslateTranslatorParameters {
        LibreTranslateTranslatorParameters {
            client: self.client,
            base_url: self.base_url,
            api_key: self.api_key,
        }
    }

    fn url(&self) -> String {
        format!("{}/translate", self.base_url)
    }
}

#[derive(Debug, Serialize)]
struct LibreTranslateBody<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LibreTranslateResponse {
    translated_text: String,
}

#[async_trait]
impl Translator for LibreTranslateTranslator {
    async fn translate(&self, request: TranslateRequest) -> CatalogResult<String> {
        debug!(
            source = %request.source,
            target = %request.target,
            chars = request.text.len(),
            "Calling translation backend"
        );

        let body = LibreTranslateBody {
            q: &request.text,
            source: request.source.as_str(),
            target: request.target.as_str(),
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(self.url())
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, &text));
        }

        let parsed: LibreTranslateResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::external(SERVICE_NAME, format!("Invalid response: {}", e)))?;

        Ok(parsed.translated_text)
    }
}

fn map_transport_error(err: reqwest::Error) -> CatalogError {
    if err.is_timeout() {
        CatalogError::Timeout(format!("Translation request timed out: {}", err))
    } else {
        CatalogError::external(SERVICE_NAME, err.to_string())
    }
}

fn map_http_error(status: StatusCode, body: &str) -> CatalogError {
    match status {
        StatusCode::BAD_REQUEST => {
            CatalogError::validation(format!("Translation rejected: {}", body))
        }
        _ => CatalogError::external(SERVICE_NAME, format!("HTTP {}: {}", status, body)),
    }
}

impl std::fmt::Debug for LibreTranslateTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibreTranslateTranslator")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}
