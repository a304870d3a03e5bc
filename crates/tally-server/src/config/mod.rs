//! Server config loader (strict parsing + env overrides).
//!
//! The config file is optional; the connection string is env-only and
//! required, so a missing credential fails the process at startup instead of
//! surfacing per request.

pub mod schema;

use std::fs;

use tally_core::error::{Result, TallyError};

pub use schema::{ServerConfig, ServerSection, StoreSection};

/// Env var holding the opaque store credential (required).
pub const ENV_CONNECTION_STRING: &str = "TALLY_CONNECTION_STRING";
/// Env var overriding the target table name (optional).
pub const ENV_TABLE_NAME: &str = "TALLY_TABLE_NAME";
/// Env var overriding the listen address (optional).
pub const ENV_LISTEN: &str = "TALLY_LISTEN";

/// Load config from an optional YAML file plus the process environment.
pub fn load(path: Option<&str>) -> Result<ServerConfig> {
    let base = match path {
        Some(p) => {
            let s = fs::read_to_string(p)
                .map_err(|e| TallyError::Config(format!("read config failed: {e}")))?;
            parse_str(&s)?
        }
        None => ServerConfig::default(),
    };
    finish(base, |k| std::env::var(k).ok())
}

/// Parse a YAML document into an (unvalidated) config.
pub fn parse_str(s: &str) -> Result<ServerConfig> {
    serde_yaml::from_str(s).map_err(|e| TallyError::Config(format!("invalid yaml: {e}")))
}

/// Apply env-style overrides from `lookup` and validate.
///
/// `lookup` is injectable so tests can exercise the merge without touching
/// process-global env vars.
pub fn finish(
    mut cfg: ServerConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ServerConfig> {
    if let Some(conn) = lookup(ENV_CONNECTION_STRING) {
        cfg.store.connection_string = Some(conn);
    }
    if let Some(table) = lookup(ENV_TABLE_NAME) {
        cfg.store.table_name = table;
    }
    if let Some(listen) = lookup(ENV_LISTEN) {
        cfg.server.listen = listen;
    }
    cfg.validate()?;
    Ok(cfg)
}
