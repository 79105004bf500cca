//! Strategy: arbitrage detection and risk-tier stake sizing.

pub mod arbitrage;
pub mod risk;

pub use arbitrage::{detect, scan_event};
pub use risk::RiskConfig;
