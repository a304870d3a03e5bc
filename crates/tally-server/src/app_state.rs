//! Shared application state.
//!
//! One store handle and one metrics registry, built once at startup and
//! cloned into every handler. The counter itself keeps no in-process state;
//! everything mutable lives behind the store.

use std::sync::Arc;

use tally_core::error::Result;

use crate::config::ServerConfig;
use crate::obs::ServerMetrics;
use crate::store::{self, TableStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    store: Arc<dyn TableStore>,
    metrics: ServerMetrics,
}

impl AppState {
    /// Build application state, opening the store named by the config.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        let store = store::open_store(cfg.connection_string(), &cfg.store.table_name)?;
        Ok(Self::with_store(cfg, store))
    }

    /// Build state around an already-open store. Used by `new` and by tests
    /// that inject a failing or pre-seeded backend.
    pub fn with_store(cfg: ServerConfig, store: Arc<dyn TableStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                store,
                metrics: ServerMetrics::default(),
            }),
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> &dyn TableStore {
        self.inner.store.as_ref()
    }

    pub fn metrics(&self) -> &ServerMetrics {
        &self.inner.metrics
    }
}
