//! Application-level errors (wraps domain and store errors)

use thiserror::Error;

use crate::domain::DomainError;
use crate::infrastructure::StoreError;

/// Application errors add not-found and use-case context on top of the
/// domain and storage layers. These carry the outcomes the core reports
/// through return values up to a caller that wants failures.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("family not found: {id}")]
    FamilyNotFound { id: String },

    #[error("node {node_id} not found in family {family_id}")]
    NodeNotFound { family_id: String, node_id: String },

    #[error("parent node {parent_id} not found in family {family_id}")]
    ParentNotFound {
        family_id: String,
        parent_id: String,
    },

    #[error("cannot move node {active_id} after {over_id}: target lies inside the moved subtree")]
    MoveIntoOwnSubtree { active_id: String, over_id: String },

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
