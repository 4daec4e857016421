//! HTTP client for the external trial search and bias-analysis service.
//!
//! Every call is a single attempt: no retry, caching or timeout is applied
//! here. Callers layer those on if they need them.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use urlencoding::encode;

use crate::config::Settings;

use super::{
    types::{MetadataAnalysisResult, SearchResponse},
    RegistryError,
};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: Client,
    base_url: String,
}

impl RegistryClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RegistryError> {
        let http = Client::builder()
            .user_agent(concat!("trial-bias/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(RegistryError::Network)?;
        Ok(Self::with_http(http, base_url))
    }

    /// Reuse an existing connection pool.
    pub fn with_http(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, RegistryError> {
        Self::new(settings.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/trials/search`.
    #[instrument(skip(self))]
    pub async fn search_trials(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResponse, RegistryError> {
        let url = format!(
            "{base}/api/trials/search?query={query}&page={page}&page_size={page_size}",
            base = self.base_url,
            query = encode(query),
        );
        let resp = self.http.get(&url).send().await?;
        decode(resp, "Search").await
    }

    /// `GET /api/trials/{nct_id}/bias`. The identifier is passed through
    /// as-is apart from URL escaping.
    #[instrument(skip(self))]
    pub async fn get_trial_bias(&self, nct_id: &str) -> Result<MetadataAnalysisResult, RegistryError> {
        let url = format!(
            "{base}/api/trials/{id}/bias",
            base = self.base_url,
            id = encode(nct_id),
        );
        let resp = self.http.get(&url).send().await?;
        decode(resp, "Bias analysis").await
    }
}

async fn decode<T: DeserializeOwned>(
    resp: Response,
    operation: &'static str,
) -> Result<T, RegistryError> {
    let status = resp.status();
    debug!(%status, operation, "registry response");
    if !status.is_success() {
        return Err(RegistryError::Http {
            operation,
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        });
    }
    let body = resp.bytes().await?;
    serde_json::from_slice(&body).map_err(|source| RegistryError::Decode { operation, source })
}
