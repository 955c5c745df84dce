//! Domain layer: entities and the pure tree core
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod forest;

pub use entities::*;
pub use error::DomainError;
pub use forest::ParentLookup;
