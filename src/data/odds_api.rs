//! The Odds API (v4) client.
//!
//! API docs: https://the-odds-api.com/liveapi/guides/v4/
//! Endpoint: `GET /v4/sports/{sport}/odds`
//! Auth: `apiKey` query parameter. Quota is charged per region × market.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::OddsProvider;
use crate::types::Event;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

const PROVIDER_NAME: &str = "the-odds-api";

/// Client settings, loaded from the `[odds_api]` config section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OddsApiConfig {
    pub base_url: String,
    /// Name of the env var holding the API key.
    pub api_key_env: String,
    pub regions: String,
    pub markets: String,
    pub odds_format: String,
    pub timeout_secs: u64,
    /// Upper bound on sport keys fetched at once.
    pub max_concurrent_fetches: usize,
}

impl Default for OddsApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.the-odds-api.com/v4".to_string(),
            api_key_env: "ODDS_API_KEY".to_string(),
            regions: "us".to_string(),
            markets: "h2h".to_string(),
            odds_format: "decimal".to_string(),
            timeout_secs: 15,
            max_concurrent_fetches: 4,
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct OddsApiClient {
    http: Client,
    api_key: SecretString,
    config: OddsApiConfig,
}

impl OddsApiClient {
    pub fn new(api_key: SecretString, config: OddsApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("SUREBET/0.1.0")
            .build()
            .context("Failed to build HTTP client for The Odds API")?;

        Ok(Self { http, api_key, config })
    }

    /// Odds endpoint for a sport key.
    fn odds_url(&self, sport_key: &str) -> String {
        format!(
            "{}/sports/{}/odds",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(sport_key),
        )
    }

    /// Query parameters, without the API key.
    fn query_params<'a>(&'a self, date: Option<&'a str>) -> Vec<(&'static str, &'a str)> {
        let mut params = vec![
            ("regions", self.config.regions.as_str()),
            ("markets", self.config.markets.as_str()),
            ("oddsFormat", self.config.odds_format.as_str()),
        ];
        if let Some(d) = date.map(str::trim).filter(|d| !d.is_empty()) {
            params.push(("dates", d));
        }
        params
    }
}

#[async_trait]
impl OddsProvider for OddsApiClient {
    async fn fetch_odds(&self, sport_key: &str, date: Option<&str>) -> Result<Vec<Event>> {
        let url = self.odds_url(sport_key);
        let params = self.query_params(date);

        debug!(url = %url, params = ?params, "Fetching odds");

        // reqwest errors print the request URL, which carries the API key.
        let resp = self
            .http
            .get(&url)
            .query(&[("apiKey", self.api_key.expose_secret().as_str())])
            .query(&params)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Odds API request failed for {sport_key}"))?;

        if let Some(remaining) = resp.headers().get("x-requests-remaining") {
            debug!(sport_key, remaining = ?remaining, "Odds API quota");
        }

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Failed to read odds response for {sport_key}"))?;

        if !status.is_success() {
            warn!(sport_key, %status, "Odds API returned an error");
            anyhow::bail!("Odds API error {status} for {sport_key}: {body}");
        }

        let events: Vec<Event> = serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse odds response for {sport_key}"))?;

        debug!(sport_key, events = events.len(), "Odds fetched");
        Ok(events)
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
