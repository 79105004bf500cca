//! End-to-end scans: HTTP request → catalog → mock provider → detector → JSON.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use secrecy::SecretString;
use std::sync::Arc;
use tower::ServiceExt;

use surebet::api::{build_router, ServiceState};
use surebet::config::AppConfig;
use surebet::data::odds_api::{OddsApiClient, OddsApiConfig};
use surebet::data::sports::SportCatalog;
use surebet::engine::OddsScanner;
use surebet::strategy::{detect, RiskConfig};
use surebet::types::RiskLevel;

use crate::mock_provider::{epl_fixture, MockProvider};

fn scanner_with(mock: &MockProvider, catalog: SportCatalog) -> OddsScanner {
    OddsScanner::new(Arc::new(mock.clone()), catalog, RiskConfig::default(), 4)
}

async fn get_json(scanner: OddsScanner, uri: &str) -> (StatusCode, serde_json::Value) {
    let app = build_router(Arc::new(ServiceState::new(scanner)));
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), 1_000_000).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn expected_epl() -> serde_json::Value {
    serde_json::json!([{
        "event": "Arsenal vs Chelsea",
        "bets": [
            {"outcome": "Arsenal", "betAmount": "4.38", "bookmaker": "DraftKings"},
            {"outcome": "Chelsea", "betAmount": "2.88", "bookmaker": "FanDuel"},
            {"outcome": "Draw", "betAmount": "2.74", "bookmaker": "BetMGM"}
        ]
    }])
}

#[tokio::test]
async fn test_soccer_request_end_to_end() {
    let mock = MockProvider::with_epl_fixture();
    let scanner = scanner_with(&mock, SportCatalog::default());

    let (status, json) = get_json(scanner, "/getOdds?sport=soccer&date=2026-10-18").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, expected_epl());

    let calls = mock.calls();
    assert_eq!(calls.len(), 39);
    assert!(calls.iter().any(|(k, _)| k == "soccer_epl"));
    assert!(calls.iter().all(|(_, d)| d.as_deref() == Some("2026-10-18")));
}

#[tokio::test]
async fn test_one_failing_key_does_not_abort_batch() {
    let mock = MockProvider::with_epl_fixture();
    mock.fail_key("soccer_efl_champ", "HTTP 429 quota exceeded");
    let scanner = scanner_with(&mock, SportCatalog::default());

    let (status, json) = get_json(scanner, "/getOdds?sport=SOCCER").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, expected_epl());
}

#[tokio::test]
async fn test_every_key_failing_is_bad_gateway() {
    let mock = MockProvider::new();
    mock.fail_key("boxing_boxing", "HTTP 401 invalid key");
    let scanner = scanner_with(&mock, SportCatalog::default());

    let (status, json) = get_json(scanner, "/getOdds?sport=boxing").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let message = json["message"].as_str().unwrap();
    assert!(message.starts_with("Failed to fetch odds"));
    assert!(message.contains("HTTP 401 invalid key"));
}

#[tokio::test]
async fn test_bad_gateway_message_never_contains_api_key() {
    let config = OddsApiConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
        ..OddsApiConfig::default()
    };
    let client = OddsApiClient::new(SecretString::new("SUPERSECRETKEY".to_string()), config).unwrap();
    let scanner = OddsScanner::new(Arc::new(client), SportCatalog::default(), RiskConfig::default(), 1);

    let (status, json) = get_json(scanner, "/getOdds?sport=boxing").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("boxing_boxing"), "{message}");
    assert!(!message.contains("SUPERSECRETKEY"), "key leaked: {message}");
    assert!(!message.contains("apiKey"), "{message}");
}

#[tokio::test]
async fn test_unknown_sport_is_not_found() {
    let mock = MockProvider::with_epl_fixture();
    let scanner = scanner_with(&mock, SportCatalog::default());

    let (status, json) = get_json(scanner, "/getOdds?sport=quidditch").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, serde_json::json!({"message": "Sport not found"}));
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_scan_report_counts() {
    let mock = MockProvider::with_epl_fixture();
    mock.fail_key("soccer_usa_mls", "timeout");
    let scanner = scanner_with(&mock, SportCatalog::default());

    let report = scanner.scan("soccer", None, RiskLevel::Low).await.unwrap();
    assert_eq!(report.sport_keys.len(), 39);
    assert_eq!(report.events_scanned, 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].sport_key, "soccer_usa_mls");
    assert_eq!(report.opportunities.len(), 1);

    let total: Decimal = report.opportunities[0]
        .bets
        .iter()
        .map(|b| b.bet_amount.parse::<Decimal>().unwrap())
        .sum();
    assert!((total - dec!(5)).abs() <= dec!(0.01));
}

#[tokio::test]
async fn test_configured_catalog_is_used() {
    let cfg = AppConfig::parse(
        r#"
        [[sports]]
        name = "Premier League"
        keys = ["soccer_epl"]
        "#,
    )
    .unwrap();

    let mock = MockProvider::with_epl_fixture();
    let scanner = scanner_with(&mock, SportCatalog::from_config(&cfg.sports));

    let (status, json) = get_json(scanner, "/getOdds?sport=premier").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, expected_epl());
    assert_eq!(mock.calls().len(), 1);
}

#[test]
fn test_fixture_detection_is_deterministic() {
    let events = epl_fixture();
    let first = serde_json::to_string(&detect(&events, dec!(10))).unwrap();
    let second = serde_json::to_string(&detect(&events, dec!(10))).unwrap();
    assert_eq!(first, second);
    assert_eq!(serde_json::from_str::<serde_json::Value>(&first).unwrap(), expected_epl());
}
