//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `item_service.rs`).

pub mod item_service_impl;
pub mod translation_engine_impl;

pub use item_service_impl::ItemServiceComponent;
pub use translation_engine_impl::{TranslationEngineComponent, TranslationEngineComponentParameters};
