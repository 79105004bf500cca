//! Upstream sports data.
//!
//! Defines the `OddsProvider` trait, the HTTP client for The Odds API,
//! and the sport catalog that turns user input into provider keys.

pub mod odds_api;
pub mod sports;

use anyhow::Result;
use async_trait::async_trait;

use crate::types::Event;

/// Abstraction over bookmaker-odds sources.
///
/// Implementors return every event for one provider sport key, each
/// carrying all bookmaker quotes the source knows about.
#[async_trait]
pub trait OddsProvider: Send + Sync {
    /// Fetch events and quotes for a sport key, optionally limited to `date`.
    async fn fetch_odds(&self, sport_key: &str, date: Option<&str>) -> Result<Vec<Event>>;

    /// Provider name for logging.
    fn name(&self) -> &str;
}
