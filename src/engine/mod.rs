//! Core engine: sport resolution → odds fetch → arbitrage detection.

pub mod scanner;

pub use scanner::{FetchFailure, OddsScanner, ScanReport};
