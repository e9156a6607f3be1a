//! In-memory repository implementations.

mod item_repository;

pub use item_repository::*;
