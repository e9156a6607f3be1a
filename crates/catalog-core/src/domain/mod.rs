//! # Catalog Domain
//!
//! The item aggregate, its translated projections, and the typed update
//! language the store understands.

pub mod item;
pub mod translated_view;
pub mod update;

pub use item::*;
pub use translated_view::*;
pub use update::*;
