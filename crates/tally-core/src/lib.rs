//! tally core: the counter record and the shared error surface.
//!
//! This crate defines the single entity the service persists and the error
//! type shared by the server and its storage backends. It intentionally
//! carries no runtime or transport dependencies so it can be reused in
//! multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `TallyError`/`Result` so production
//! processes do not crash on bad input or a misbehaving store.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod record;

/// Shared result type.
pub use error::{Result, TallyError};
pub use record::CounterRecord;
