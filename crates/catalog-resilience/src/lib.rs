//! # Catalog Resilience
//!
//! Resilience patterns for calls to external services: bounded waiting and
//! retry with exponential backoff.

pub mod retry;
pub mod timeout;

pub use retry::*;
pub use timeout::*;
