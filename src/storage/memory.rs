//! In-memory repositories.
//!
//! Records live in insertion order behind `parking_lot` locks; locks are
//! never held across await points (the traits are synchronous). The forest
//! store keeps an explicit tree-id to forest-id ownership index, updated in
//! the same critical section as the record mutation, so
//! `find_forest_by_tree_id` is a lookup rather than a scan over every
//! forest's membership list.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::model::{Forest, NewForest, NewTree, Tree};
use crate::domain::repository::{ForestRepository, TreeRepository};

#[derive(Default)]
pub struct MemoryTreeRepository {
    trees: RwLock<Vec<Tree>>,
}

impl MemoryTreeRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TreeRepository for MemoryTreeRepository {
    fn find_all(&self) -> Result<Vec<Tree>> {
        Ok(self.trees.read().clone())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Tree>> {
        Ok(self.trees.read().iter().find(|t| t.id == id).cloned())
    }

    fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Tree>> {
        Ok(self
            .trees
            .read()
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }

    fn insert(&self, tree: NewTree) -> Result<Tree> {
        let tree = Tree {
            id: Uuid::new_v4(),
            birth: tree.birth,
            species: tree.species,
            exposure: tree.exposure,
            carbon_storage_capacity: tree.carbon_storage_capacity,
        };
        self.trees.write().push(tree.clone());
        Ok(tree)
    }

    fn update(&self, tree: Tree) -> Result<Tree> {
        let mut trees = self.trees.write();
        let slot = trees
            .iter_mut()
            .find(|t| t.id == tree.id)
            .ok_or_else(|| anyhow!("tree {} not found in store", tree.id))?;
        *slot = tree.clone();
        Ok(tree)
    }

    fn delete(&self, id: Uuid) -> Result<bool> {
        let mut trees = self.trees.write();
        match trees.iter().position(|t| t.id == id) {
            Some(index) => {
                trees.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
struct ForestStore {
    forests: Vec<Forest>,
    /// tree id -> owning forest id
    owners: HashMap<Uuid, Uuid>,
}

#[derive(Default)]
pub struct MemoryForestRepository {
    inner: RwLock<ForestStore>,
}

impl MemoryForestRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ForestRepository for MemoryForestRepository {
    fn find_all(&self) -> Result<Vec<Forest>> {
        Ok(self.inner.read().forests.clone())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Forest>> {
        Ok(self
            .inner
            .read()
            .forests
            .iter()
            .find(|f| f.id == id)
            .cloned())
    }

    fn insert(&self, forest: NewForest) -> Result<Forest> {
        let forest = Forest {
            id: Uuid::new_v4(),
            kind: forest.kind,
            surface: forest.surface,
            tree_ids: forest.tree_ids,
        };

        let store = &mut *self.inner.write();
        for tree_id in &forest.tree_ids {
            store.owners.insert(*tree_id, forest.id);
        }
        store.forests.push(forest.clone());
        Ok(forest)
    }

    fn update(&self, forest: Forest) -> Result<Forest> {
        let store = &mut *self.inner.write();
        let index = store
            .forests
            .iter()
            .position(|f| f.id == forest.id)
            .ok_or_else(|| anyhow!("forest {} not found in store", forest.id))?;

        store.owners.retain(|_, owner| *owner != forest.id);
        for tree_id in &forest.tree_ids {
            store.owners.insert(*tree_id, forest.id);
        }
        store.forests[index] = forest.clone();
        Ok(forest)
    }

    fn delete(&self, id: Uuid) -> Result<bool> {
        let store = &mut *self.inner.write();
        match store.forests.iter().position(|f| f.id == id) {
            Some(index) => {
                store.forests.remove(index);
                store.owners.retain(|_, owner| *owner != id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn find_forest_by_tree_id(&self, tree_id: Uuid) -> Result<Option<Forest>> {
        let store = self.inner.read();
        Ok(store
            .owners
            .get(&tree_id)
            .and_then(|owner| store.forests.iter().find(|f| f.id == *owner).cloned()))
    }
}
