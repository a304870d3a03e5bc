//! Table store seam.
//!
//! The counter handler talks to a wide-table-style store through the
//! [`TableStore`] trait: one row fetched by (partition key, row key), written
//! back as an unconditional replace. Absence is an explicit [`Lookup`]
//! variant, not an error, so the first-visit branch never rides on error
//! control flow.

pub mod file;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use tally_core::error::{Result, TallyError};
use tally_core::record::CounterRecord;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Result of a single-row fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(CounterRecord),
    NotFound,
}

/// One table in a wide-table-style store.
///
/// `update_entity` is a whole-record overwrite with no etag or
/// compare-and-swap: two racing read-then-write sequences may both land the
/// same count, and last writer wins. That is the specified update mode, not
/// an oversight.
#[async_trait]
pub trait TableStore: Send + Sync + std::fmt::Debug {
    /// Fetch the row at (partition_key, row_key), if any.
    async fn get_entity(&self, partition_key: &str, row_key: &str) -> Result<Lookup>;

    /// Replace an existing row wholesale. Errors if the row does not exist.
    async fn update_entity(&self, record: &CounterRecord) -> Result<()>;

    /// Insert a new row. Errors if the row already exists.
    async fn create_entity(&self, record: &CounterRecord) -> Result<()>;
}

/// Open the backend named by the connection string.
///
/// Recognized schemes:
/// - `memory:` — in-process table, lost on restart (dev/test)
/// - `file:<path>` — JSON document on disk
pub fn open_store(connection_string: &str, table_name: &str) -> Result<Arc<dyn TableStore>> {
    if connection_string == "memory:" {
        return Ok(Arc::new(MemoryStore::new(table_name)));
    }
    if let Some(path) = connection_string.strip_prefix("file:") {
        if path.is_empty() {
            return Err(TallyError::Config("file: connection needs a path".into()));
        }
        return Ok(Arc::new(FileStore::new(path, table_name)));
    }
    Err(TallyError::Config(format!(
        "unrecognized connection string scheme: {connection_string:?}"
    )))
}
