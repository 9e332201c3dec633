//! Shared utilities for the stock assistant
//!
//! Logging setup and environment-variable helpers used by the domain crate
//! and the `stock-bot` binary.

pub mod env;
pub mod logging;

pub use logging::{init_tracing, init_tracing_with};
