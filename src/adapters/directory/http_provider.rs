//! HTTP adapter for the lawyer-directory lookup.
//!
//! Queries a places-style search endpoint for professionals matching a
//! specialty near a location. The gateway degrades every error to an
//! empty list, so this adapter only reports, never recovers.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::analysis::DirectoryEntry;
use crate::ports::{DirectoryProvider, ProviderError};

/// Configuration for the directory search endpoint.
#[derive(Debug, Clone)]
pub struct HttpDirectoryConfig {
    api_key: Option<Secret<String>>,
    pub base_url: String,
    pub timeout: Duration,
}

impl HttpDirectoryConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(Secret::new(api_key.into())),
            ..Self::unconfigured()
        }
    }

    /// Without credentials every lookup reports `not_configured`.
    pub fn unconfigured() -> Self {
        Self {
            api_key: None,
            base_url: "https://places.googleapis.com".to_string(),
            timeout: Duration::from_millis(2000),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret().as_str())
    }
}

/// Places-search client implementing the directory port.
pub struct HttpDirectoryProvider {
    config: HttpDirectoryConfig,
    client: Client,
}

impl HttpDirectoryProvider {
    pub fn new(config: HttpDirectoryConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn search_url(&self) -> String {
        format!("{}/v1/places:searchText", self.config.base_url)
    }
}

#[async_trait]
impl DirectoryProvider for HttpDirectoryProvider {
    async fn find_lawyers(
        &self,
        location: &str,
        specialty: &str,
        timeout: Duration,
    ) -> Result<Vec<DirectoryEntry>, ProviderError> {
        let Some(api_key) = self.config.api_key() else {
            return Err(ProviderError::NotConfigured);
        };

        let query = format!("avocat {} {}", specialty, location);
        let response = self
            .client
            .post(self.search_url())
            .header("X-Goog-Api-Key", api_key)
            .header(
                "X-Goog-FieldMask",
                "places.displayName,places.formattedAddress,places.nationalPhoneNumber",
            )
            .timeout(timeout)
            .json(&serde_json::json!({ "textQuery": query, "languageCode": "fr" }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout
                } else {
                    ProviderError::Upstream(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream(format!("{}: {}", status, body)));
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        Ok(search
            .places
            .into_iter()
            .map(|place| DirectoryEntry {
                name: place.display_name.text,
                specialty: specialty.to_string(),
                city: place.formatted_address.unwrap_or_else(|| location.to_string()),
                phone: place.national_phone_number,
            })
            .collect())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    places: Vec<Place>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Place {
    display_name: DisplayName,
    formatted_address: Option<String>,
    national_phone_number: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DisplayName {
    text: String,
}
