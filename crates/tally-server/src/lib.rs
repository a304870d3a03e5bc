//! tally server library entry.
//!
//! This crate wires the config layer, the table store backends, the counter
//! handler, and the operational endpoints into a small HTTP service. It is
//! intended to be consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod config;
pub mod counter;
pub mod obs;
pub mod ops;
pub mod router;
pub mod store;
