//! Shared error type across tally crates.
//!
//! The HTTP surface deliberately flattens every failure to a generic 500
//! with a textual message; the variants below exist so the server and the
//! storage backends can still log and test failures by origin.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, TallyError>;

/// Unified error type used by core, server, and storage backends.
#[derive(Debug, Error)]
pub enum TallyError {
    /// Invalid or missing configuration, detected at startup.
    #[error("config: {0}")]
    Config(String),
    /// The table store failed (I/O, corruption, conflict). A missing record
    /// is not an error; the store reports it as `Lookup::NotFound`.
    #[error("store: {0}")]
    Store(String),
    /// Serialization of a record or response failed.
    #[error("serialize: {0}")]
    Serialize(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl TallyError {
    /// Message carried in the `{"error": ...}` body of a 500 response.
    pub fn public_message(&self) -> String {
        self.to_string()
    }
}
