//! Risk tiers.
//!
//! Maps the user's `low | medium | high` selection to the total stake
//! the arbitrage detector splits across an opportunity's legs.

use anyhow::{bail, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::types::RiskLevel;

/// Total stake per risk tier. `medium` matches the historical fixed stake of 10.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub low: Decimal,
    pub medium: Decimal,
    pub high: Decimal,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            low: dec!(5),
            medium: dec!(10),
            high: dec!(20),
        }
    }
}

impl RiskConfig {
    /// Stake multiplier for a tier.
    pub fn multiplier_for(&self, level: RiskLevel) -> Decimal {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
        }
    }

    /// Every tier must stake a positive amount.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("low", self.low), ("medium", self.medium), ("high", self.high)] {
            if value <= Decimal::ZERO {
                bail!("risk.{name} must be positive, got {value}");
            }
        }
        Ok(())
    }
}
