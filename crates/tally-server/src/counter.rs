//! The visitor counter handler.
//!
//! One read and one write per request: fetch the single counter row, branch
//! on existence, write back. The replace write is unconditional, so two
//! requests racing on the same stored count can both land the same value;
//! last writer wins. That tradeoff is inherited from the original service
//! and kept as-is.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use tally_core::error::Result;
use tally_core::record::{CounterRecord, PARTITION_KEY, ROW_KEY};

use crate::app_state::AppState;
use crate::obs::ServerMetrics;
use crate::store::{Lookup, TableStore};

/// Apply one visit to the counter row and return the resulting count.
///
/// A missing row means first visit and becomes `count = 1`; any store
/// failure propagates without a write being attempted.
pub async fn record_visit(store: &dyn TableStore, metrics: &ServerMetrics) -> Result<u64> {
    let looked_up = store.get_entity(PARTITION_KEY, ROW_KEY).await;
    metrics
        .store_ops
        .inc(&[("op", "get"), ("outcome", outcome(&looked_up))]);

    match looked_up? {
        Lookup::Found(mut rec) => {
            rec.increment();
            let written = store.update_entity(&rec).await;
            metrics
                .store_ops
                .inc(&[("op", "update"), ("outcome", outcome(&written))]);
            written?;
            Ok(rec.count)
        }
        Lookup::NotFound => {
            let rec = CounterRecord::first_visit();
            let written = store.create_entity(&rec).await;
            metrics
                .store_ops
                .inc(&[("op", "create"), ("outcome", outcome(&written))]);
            written?;
            Ok(rec.count)
        }
    }
}

fn outcome<T>(res: &Result<T>) -> &'static str {
    if res.is_ok() {
        "ok"
    } else {
        "error"
    }
}

/// `/counter` handler. Any method; body and query are not consulted.
///
/// Success: 200 `{"visitors": <count>}`. Every failure collapses to 500
/// `{"error": "<message>"}` with no code taxonomy and no retry.
pub async fn counter(State(state): State<AppState>) -> impl IntoResponse {
    match record_visit(state.store(), state.metrics()).await {
        Ok(count) => {
            state.metrics().counter_requests.inc(&[("outcome", "ok")]);
            (StatusCode::OK, Json(json!({ "visitors": count })))
        }
        Err(e) => {
            tracing::error!(error = %e, "counter request failed");
            state.metrics().counter_requests.inc(&[("outcome", "error")]);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.public_message() })),
            )
        }
    }
}
