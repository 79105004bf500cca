//! Shared types for the SUREBET service.
//!
//! Upstream odds payloads (events, bookmakers, markets, outcomes), the
//! derived arbitrage opportunities returned to the browser, the risk tier
//! selector, and the domain error enums.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Upstream odds data
// ---------------------------------------------------------------------------

/// One scheduled match as returned by the odds provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub sport_key: Option<String>,
    #[serde(default)]
    pub sport_title: Option<String>,
    #[serde(default)]
    pub commence_time: Option<DateTime<Utc>>,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub bookmakers: Vec<Bookmaker>,
}

impl Event {
    /// Display label used in opportunities: `"{home} vs {away}"`.
    pub fn label(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }
}

/// A single operator's quotes for an event.
///
/// `title` is an opaque identifier: it is never normalised, so
/// "Bet365" and "bet365" count as two different bookmakers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmaker {
    #[serde(default)]
    pub key: Option<String>,
    pub title: String,
    #[serde(default)]
    pub markets: Vec<BookMarket>,
}

/// A class of bet offered by a bookmaker (`h2h`, `spreads`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookMarket {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub outcomes: Vec<Outcome>,
}

/// One possible result and its decimal-odds price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub name: String,
    /// Decimal odds. `None` when the provider omitted the field.
    #[serde(default)]
    pub price: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Derived opportunities
// ---------------------------------------------------------------------------

/// A detected arbitrage across bookmakers for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    pub event: String,
    pub bets: Vec<Bet>,
}

/// One leg of an opportunity. `bet_amount` is always rendered with
/// exactly two fractional digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    pub outcome: String,
    pub bet_amount: String,
    pub bookmaker: String,
}

impl fmt::Display for Opportunity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let legs: Vec<String> = self
            .bets
            .iter()
            .map(|b| format!("${} on {} at {}", b.bet_amount, b.outcome, b.bookmaker))
            .collect();
        write!(f, "{}: {}", self.event, legs.join(", "))
    }
}

// ---------------------------------------------------------------------------
// Risk tier
// ---------------------------------------------------------------------------

/// User-selected stake size. Each tier maps to a total stake
/// (the detector's risk multiplier) via configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

impl FromStr for RiskLevel {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            _ => Err(ScanError::InvalidRiskLevel(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Data-quality problems found while scanning a single event.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OddsDataError {
    #[error("Missing price for '{outcome}' at {bookmaker} ({event})")]
    MissingPrice {
        event: String,
        bookmaker: String,
        outcome: String,
    },

    #[error("Invalid price {price} for '{outcome}' at {bookmaker} ({event})")]
    InvalidPrice {
        event: String,
        bookmaker: String,
        outcome: String,
        price: Decimal,
    },
}

/// Failures of a full odds scan for one sport.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Sport not found")]
    SportNotFound(String),

    #[error("Invalid risk level: {0} (expected low, medium or high)")]
    InvalidRiskLevel(String),

    #[error("Failed to fetch odds: all {attempted} sport keys failed ({first_error})")]
    UpstreamUnavailable { attempted: usize, first_error: String },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
