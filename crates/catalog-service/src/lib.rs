//! # Catalog Service
//!
//! Business logic for the polyglot catalog: item use cases and the
//! cache-aside translation engine, plus the translator backends it calls.

pub mod dto;
pub mod r#impl;
pub mod item_service;
pub mod libre_translate;
pub mod metrics;
pub mod translation_engine;
pub mod translator;

pub use dto::*;
pub use item_service::*;
pub use libre_translate::*;
pub use r#impl::{
    ItemServiceComponent, TranslationEngineComponent, TranslationEngineComponentParameters,
};
pub use translation_engine::*;
pub use translator::*;
