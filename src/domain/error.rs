//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent input-rule violations caught at the validation
/// boundary. The tree operations themselves never fail; absent ids are
/// no-ops communicated through return values.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("dni must be a positive integer")]
    NonPositiveDni,

    #[error("update must set at least one field")]
    EmptyPatch,

    #[error("custom field '{field_id}' must have a non-empty id and label")]
    InvalidCustomField { field_id: String },
}
