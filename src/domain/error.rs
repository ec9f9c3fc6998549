//! Domain error taxonomy.
//!
//! All three kinds are raised synchronously at the point of detection and
//! propagate unchanged to the caller; the domain never swallows or retries.
//! Repository failures the domain does not specifically catch travel
//! through the `Internal` variant.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    /// A referenced tree or forest does not exist.
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// The one-tree-one-forest invariant would be violated.
    #[error("tree {tree_id} is already assigned to forest {forest_id}")]
    Conflict { tree_id: Uuid, forest_id: Uuid },

    /// A domain rule is violated on otherwise well-formed input.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DomainError {
    pub(crate) fn tree_not_found(id: Uuid) -> Self {
        Self::NotFound {
            resource: "tree",
            id: id.to_string(),
        }
    }

    pub(crate) fn forest_not_found(id: Uuid) -> Self {
        Self::NotFound {
            resource: "forest",
            id: id.to_string(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
