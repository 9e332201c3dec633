//! Core abstractions for the stock assistant
//!
//! This crate defines the traits and types shared by the tool layer and the
//! domain crate: the [`Agent`] trait, the per-request [`Context`], and the
//! common [`Error`] type.

pub mod agent;
pub mod context;
pub mod error;

pub use agent::Agent;
pub use context::{Context, ResponseFormat};
pub use error::{Error, Result};
