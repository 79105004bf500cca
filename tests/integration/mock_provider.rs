//! Mock odds provider for integration testing.
//!
//! Serves canned events per sport key, records every call, and can be
//! told to fail specific keys. All in-memory, no network.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use surebet::data::OddsProvider;
use surebet::types::Event;

const SOCCER_EPL: &str = include_str!("../fixtures/soccer_epl.json");

/// A mock odds provider for deterministic testing.
#[derive(Clone, Default)]
pub struct MockProvider {
    events: Arc<Mutex<HashMap<String, Vec<Event>>>>,
    failing: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<(String, Option<String>)>>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that serves the EPL fixture for `soccer_epl`.
    pub fn with_epl_fixture() -> Self {
        let mock = Self::new();
        mock.set_events("soccer_epl", epl_fixture());
        mock
    }

    pub fn set_events(&self, sport_key: &str, events: Vec<Event>) {
        self.events
            .lock()
            .unwrap()
            .insert(sport_key.to_string(), events);
    }

    /// Make every fetch of `sport_key` fail with `message`.
    pub fn fail_key(&self, sport_key: &str, message: &str) {
        self.failing
            .lock()
            .unwrap()
            .insert(sport_key.to_string(), message.to_string());
    }

    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl OddsProvider for MockProvider {
    async fn fetch_odds(&self, sport_key: &str, date: Option<&str>) -> Result<Vec<Event>> {
        self.calls
            .lock()
            .unwrap()
            .push((sport_key.to_string(), date.map(String::from)));

        if let Some(msg) = self.failing.lock().unwrap().get(sport_key) {
            return Err(anyhow!("mock failure for {sport_key}: {msg}"));
        }

        Ok(self
            .events
            .lock()
            .unwrap()
            .get(sport_key)
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// The EPL fixture: one three-way arbitrage, one fair-priced match,
/// and one match with no bookmakers.
pub fn epl_fixture() -> Vec<Event> {
    serde_json::from_str(SOCCER_EPL).expect("fixture parses")
}
