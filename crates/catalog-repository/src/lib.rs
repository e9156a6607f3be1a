//! # Catalog Repository
//!
//! Item store implementations behind the [`ItemRepository`] trait:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ItemRepository>
//! InMemoryItemRepository | MySqlItemRepository
//!   ↓                         ↓
//! RwLock<BTreeMap>          MySQL (catalog_items, JSON translations column)
//! ```

pub mod health;
pub mod memory;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use health::*;
pub use memory::*;
pub use mysql::*;
pub use pool::*;
pub use traits::*;
