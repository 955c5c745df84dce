//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the storage boundary trait (FamilyStore) but are
//! themselves concrete structs, not traits.

mod family;

pub use family::{FamilyService, NodeParent};
