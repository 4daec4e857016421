//! Runtime configuration utilities for trial-bias.

use std::env;

use serde::Deserialize;

/// Analysis service used when `BIAS_API_URL` is unset.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8001";

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Base URL of the external trial search and bias-analysis service.
    pub api_base_url: String,
    /// Optional webhook notified of pilot requests.
    pub pilot_webhook_url: Option<String>,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let api_base_url = env::var("BIAS_API_URL")
            .ok()
            .and_then(non_blank)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let pilot_webhook_url = env::var("PILOT_REQUEST_WEBHOOK_URL")
            .ok()
            .and_then(non_blank);

        Ok(Self::new(api_base_url, pilot_webhook_url))
    }

    pub fn new(api_base_url: impl Into<String>, pilot_webhook_url: Option<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            pilot_webhook_url,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL, None)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
