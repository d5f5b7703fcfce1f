//! Profile-scraping API client
//!
//! Thin pass-through to a RapidAPI-hosted scraper. The response document is
//! opaque: it is stored and served verbatim, with no shape validation.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info};

use crate::config::ScraperConfig;
use crate::error::{AppError, Result};

/// Fetches profile documents by username. Handlers depend on this seam so
/// tests can count and stub fetches.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    /// Fetch a profile document by username, returned as raw JSON.
    async fn fetch_profile(&self, username: &str) -> Result<Value>;
}

#[derive(Clone)]
pub struct ScraperClient {
    client: reqwest::Client,
    config: ScraperConfig,
}

impl ScraperClient {
    pub fn new(config: ScraperConfig) -> Self {
        // The scraper call is bounded by a fixed upper time limit, unlike the
        // generation path which waits for the model.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client, config }
    }
}

#[async_trait]
impl ProfileFetcher for ScraperClient {
    async fn fetch_profile(&self, username: &str) -> Result<Value> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                AppError::MissingConfiguration(
                    "SCRAPER_API_KEY is not set in the environment".to_string(),
                )
            })?;

        let url = format!("{}/profile_by_username", self.config.base_url);
        info!(username = %username, "Calling scraper API");

        let response = self
            .client
            .get(&url)
            .query(&[("username", username)])
            .header("x-rapidapi-key", api_key)
            .header("x-rapidapi-host", &self.config.api_host)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("scraper request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(username = %username, %status, "Scraper API error: {}", body);
            return Err(AppError::ExternalApi(format!(
                "scraper API returned {}: {}",
                status, body
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::ExternalApi(format!("failed to parse scraper response: {}", e)))
    }
}
