//! Repository traits for inventory persistence.
//!
//! The domain services depend only on these traits; implementations live in
//! `storage`. Methods are synchronous: the core never suspends, and any
//! backend that needs I/O wraps it behind this seam.

use anyhow::Result;
use uuid::Uuid;

use super::model::{Forest, NewForest, NewTree, Tree};

pub trait TreeRepository: Send + Sync {
    fn find_all(&self) -> Result<Vec<Tree>>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<Tree>>;

    /// Returns only the subset of `ids` that exist, silently dropping
    /// unknown ids.
    fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Tree>>;

    /// Persists a new record, assigning its identity.
    fn insert(&self, tree: NewTree) -> Result<Tree>;

    /// Full replacement by identity. Errors if the identity is unknown.
    fn update(&self, tree: Tree) -> Result<Tree>;

    /// Returns whether a record existed and was removed.
    fn delete(&self, id: Uuid) -> Result<bool>;
}

pub trait ForestRepository: Send + Sync {
    fn find_all(&self) -> Result<Vec<Forest>>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<Forest>>;

    /// Persists a new record, assigning its identity.
    fn insert(&self, forest: NewForest) -> Result<Forest>;

    /// Full replacement by identity. Errors if the identity is unknown.
    fn update(&self, forest: Forest) -> Result<Forest>;

    /// Returns whether a record existed and was removed.
    fn delete(&self, id: Uuid) -> Result<bool>;

    /// Resolves the forest currently holding `tree_id` in its membership
    /// list, or `None` if the tree is unowned.
    fn find_forest_by_tree_id(&self, tree_id: Uuid) -> Result<Option<Forest>>;
}
