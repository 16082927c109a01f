//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analytics::CustomerSummary;
use crate::decode;
use crate::domain::IngestError;
use crate::error::{AppError, AppResult};
use crate::ledger::Reconciliation;
use crate::reducer::{BatchReport, IngestOutcome};

use super::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct IngestResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// visit, opened, revised, stale or ignored
    pub effect: String,
    pub expenditure_delta: Decimal,
}

impl From<IngestOutcome> for IngestResponse {
    fn from(outcome: IngestOutcome) -> Self {
        let effect = match (&outcome.customer_id, &outcome.reconciliation) {
            (None, _) => "ignored",
            (Some(_), None) => "visit",
            (Some(_), Some(Reconciliation::Opened { .. })) => "opened",
            (Some(_), Some(Reconciliation::Revised { .. })) => "revised",
            (Some(_), Some(Reconciliation::Stale)) => "stale",
        };
        let expenditure_delta = outcome
            .reconciliation
            .map(|r| r.delta())
            .unwrap_or(Decimal::ZERO);

        Self {
            customer_id: outcome.customer_id,
            effect: effect.to_string(),
            expenditure_delta,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    #[serde(default)]
    pub k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TopResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<DateTime<Utc>>,
    pub customers: Vec<CustomerSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub customer_count: usize,
    pub order_count: usize,
    pub watermark: Option<DateTime<Utc>>,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/events", post(ingest_event))
        .route("/events/batch", post(ingest_batch))
        .route("/top", get(top_customers))
        .route("/customers/:customer_id", get(get_customer))
        .route("/stats", get(stats))
}

// =========================================================================
// POST /events
// =========================================================================

/// Ingest a single event
async fn ingest_event(
    State(state): State<AppState>,
    Json(event): Json<Value>,
) -> AppResult<Json<IngestResponse>> {
    let record = decode::decode_value(event).map_err(|e| {
        tracing::warn!("Rejected event: {}", e);
        IngestError::from(e)
    })?;

    let outcome = state.reducer.write().await.ingest(&record)?;

    Ok(Json(outcome.into()))
}

// =========================================================================
// POST /events/batch
// =========================================================================

/// Ingest an array of events; failures are counted, not fatal
async fn ingest_batch(
    State(state): State<AppState>,
    Json(events): Json<Vec<Value>>,
) -> Json<BatchReport> {
    let decoded: Vec<_> = events.into_iter().map(decode::decode_value).collect();

    let report = state.reducer.write().await.ingest_batch(decoded);

    Json(report)
}

// =========================================================================
// GET /top?k=N
// =========================================================================

/// Highest-LTV customers as of the watermark
async fn top_customers(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> AppResult<Json<TopResponse>> {
    let k = query.k.unwrap_or(state.default_top_k);
    if k > state.max_top_k {
        return Err(AppError::InvalidRequest(format!(
            "k must be at most {}",
            state.max_top_k
        )));
    }

    let reducer = state.reducer.read().await;

    Ok(Json(TopResponse {
        as_of: reducer.watermark(),
        customers: reducer.top_k(k),
    }))
}

// =========================================================================
// GET /customers/:customer_id
// =========================================================================

/// One customer's summary
async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> AppResult<Json<CustomerSummary>> {
    let summary = state.reducer.read().await.summary(&customer_id);

    summary
        .map(Json)
        .ok_or(AppError::CustomerNotFound(customer_id))
}

// =========================================================================
// GET /stats
// =========================================================================

async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let reducer = state.reducer.read().await;

    Json(StatsResponse {
        customer_count: reducer.customer_count(),
        order_count: reducer.order_count(),
        watermark: reducer.watermark(),
    })
}
