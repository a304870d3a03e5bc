//! Axum router wiring.
//!
//! `/counter` takes any method (the original endpoint never restricted
//! one); ops endpoints sit beside it.

use axum::{
    routing::{any, get},
    Router,
};

use crate::{app_state::AppState, counter, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/counter", any(counter::counter))
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
