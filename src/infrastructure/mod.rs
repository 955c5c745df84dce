//! Infrastructure layer: storage implementations and DI container

pub mod di;
pub mod error;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use traits::{FamilyStore, JsonFileStore};
