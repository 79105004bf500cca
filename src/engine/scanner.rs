//! Odds scanner.
//!
//! Resolves a sport name to provider keys, fetches odds for each key
//! with bounded concurrency, and runs arbitrage detection over the
//! combined event list. A failing key is logged and recorded, and the
//! remaining keys still contribute events.

use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::data::sports::SportCatalog;
use crate::data::OddsProvider;
use crate::strategy::{arbitrage, RiskConfig};
use crate::types::{Event, Opportunity, RiskLevel, ScanError};

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// A sport key whose fetch failed during a scan.
#[derive(Debug, Clone)]
pub struct FetchFailure {
    pub sport_key: String,
    pub error: String,
}

/// Result of one scan.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub sport: String,
    pub risk_level: RiskLevel,
    pub sport_keys: Vec<String>,
    pub events_scanned: usize,
    pub failures: Vec<FetchFailure>,
    pub opportunities: Vec<Opportunity>,
    pub scanned_at: DateTime<Utc>,
}

impl ScanReport {
    /// Whether some, but not all, sport keys failed.
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

pub struct OddsScanner {
    provider: Arc<dyn OddsProvider>,
    catalog: SportCatalog,
    risk: RiskConfig,
    max_concurrent_fetches: usize,
}

impl OddsScanner {
    pub fn new(
        provider: Arc<dyn OddsProvider>,
        catalog: SportCatalog,
        risk: RiskConfig,
        max_concurrent_fetches: usize,
    ) -> Self {
        Self {
            provider,
            catalog,
            risk,
            max_concurrent_fetches: max_concurrent_fetches.max(1),
        }
    }

    pub fn catalog(&self) -> &SportCatalog {
        &self.catalog
    }

    /// Scan one sport for arbitrage opportunities.
    pub async fn scan(
        &self,
        sport: &str,
        date: Option<&str>,
        risk_level: RiskLevel,
    ) -> Result<ScanReport, ScanError> {
        let sport_keys = self.catalog.find_keys(sport);
        if sport_keys.is_empty() {
            info!(sport, "Sport not found");
            return Err(ScanError::SportNotFound(sport.to_string()));
        }
        info!(sport, keys = ?sport_keys, "Sport keys found");

        let (events, failures) = self.fetch_all(&sport_keys, date).await;

        if failures.len() == sport_keys.len() {
            let first_error = failures
                .first()
                .map(|f| f.error.clone())
                .unwrap_or_default();
            return Err(ScanError::UpstreamUnavailable {
                attempted: sport_keys.len(),
                first_error,
            });
        }

        let multiplier = self.risk.multiplier_for(risk_level);
        let opportunities = arbitrage::detect(&events, multiplier);

        info!(
            sport,
            risk = %risk_level,
            keys = sport_keys.len(),
            failed = failures.len(),
            events = events.len(),
            opportunities = opportunities.len(),
            "Scan complete"
        );

        Ok(ScanReport {
            sport: sport.to_string(),
            risk_level,
            sport_keys,
            events_scanned: events.len(),
            failures,
            opportunities,
            scanned_at: Utc::now(),
        })
    }

    /// Fetch every key, keeping results in key order.
    async fn fetch_all(
        &self,
        sport_keys: &[String],
        date: Option<&str>,
    ) -> (Vec<Event>, Vec<FetchFailure>) {
        let provider = &self.provider;

        let results: Vec<(String, Result<Vec<Event>>)> = stream::iter(sport_keys.iter().cloned())
            .map(|key| async move {
                debug!(sport_key = %key, provider = provider.name(), "Fetching odds for sport key");
                let result = provider.fetch_odds(&key, date).await;
                (key, result)
            })
            .buffered(self.max_concurrent_fetches)
            .collect()
            .await;

        let mut events = Vec::new();
        let mut failures = Vec::new();

        for (sport_key, result) in results {
            match result {
                Ok(batch) => {
                    debug!(sport_key = %sport_key, events = batch.len(), "Odds received");
                    events.extend(batch);
                }
                Err(e) => {
                    warn!(sport_key = %sport_key, error = %e, "Odds fetch failed, continuing without");
                    failures.push(FetchFailure {
                        sport_key,
                        error: format!("{e:#}"),
                    });
                }
            }
        }

        (events, failures)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
