//! Custom Axum extractors.

mod json;
mod requester;

pub use json::*;
pub use requester::*;
