//! MySQL repository implementations.

mod item_repository;

pub use item_repository::*;
