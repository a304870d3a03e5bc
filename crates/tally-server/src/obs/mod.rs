//! Lightweight in-process metrics (dependency-free).
//!
//! Counters are stored as atomics and rendered by the `/metrics` handler in
//! Prometheus text format; no exporter crate is pulled in for two counter
//! families.

pub mod metrics;

pub use metrics::ServerMetrics;
