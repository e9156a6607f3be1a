//! # Catalog Core
//!
//! Core types, traits, and error definitions for the polyglot catalog.
//! Holds the item domain model, the typed store update language, and the
//! foundational abstractions shared by every other crate in the workspace.

pub mod domain;
pub mod error;
pub mod id;
pub mod language;
pub mod result;
pub mod telemetry;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use language::*;
pub use result::*;
pub use telemetry::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
