//! HTTP route handlers.
//!
//! `/getOdds` returns a JSON array of opportunities. Every error is a
//! JSON body of the form `{"message": "..."}`.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::engine::OddsScanner;
use crate::types::{Opportunity, RiskLevel, ScanError};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// State shared by all handlers. Read-only after startup.
pub struct ServiceState {
    pub scanner: OddsScanner,
    pub started_at: DateTime<Utc>,
}

impl ServiceState {
    pub fn new(scanner: OddsScanner) -> Self {
        Self {
            scanner,
            started_at: Utc::now(),
        }
    }
}

pub type AppState = Arc<ServiceState>;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OddsQuery {
    pub sport: Option<String>,
    pub date: Option<String>,
    pub risk_level: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: i64,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing required query parameter: sport")]
    MissingSport,

    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingSport => StatusCode::BAD_REQUEST,
            ApiError::Scan(ScanError::InvalidRiskLevel(_)) => StatusCode::BAD_REQUEST,
            ApiError::Scan(ScanError::SportNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Scan(ScanError::UpstreamUnavailable { .. }) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /getOdds?sport=&date=&riskLevel=
pub async fn get_odds(
    State(state): State<AppState>,
    Query(query): Query<OddsQuery>,
) -> Result<Json<Vec<Opportunity>>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("get_odds", %request_id);
    handle_get_odds(state, query).instrument(span).await
}

async fn handle_get_odds(
    state: AppState,
    query: OddsQuery,
) -> Result<Json<Vec<Opportunity>>, ApiError> {
    info!(
        sport = ?query.sport,
        date = ?query.date,
        risk_level = ?query.risk_level,
        "Received request for odds"
    );

    let sport = query
        .sport
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or(ApiError::MissingSport)?;

    let risk_level = match query.risk_level.as_deref().filter(|r| !r.trim().is_empty()) {
        Some(raw) => raw.parse::<RiskLevel>()?,
        None => RiskLevel::default(),
    };

    let report = state
        .scanner
        .scan(sport, query.date.as_deref(), risk_level)
        .await
        .map_err(|e| {
            warn!(error = %e, "Odds request failed");
            e
        })?;

    if report.is_partial() {
        warn!(
            sport = %report.sport,
            failed = report.failures.len(),
            attempted = report.sport_keys.len(),
            failed_keys = ?report.failures.iter().map(|f| f.sport_key.as_str()).collect::<Vec<_>>(),
            "Returning partial results"
        );
    }

    info!(
        sport = %report.sport,
        risk = %report.risk_level,
        events = report.events_scanned,
        count = report.opportunities.len(),
        scanned_at = %report.scanned_at,
        "Arbitrage opportunities found"
    );
    Ok(Json(report.opportunities))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds();
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            uptime_secs,
        }),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
