//! Forest domain service.
//!
//! Owns the one-tree-one-forest invariant: every path that commits a
//! membership list runs the availability check first, and all mutating
//! operations serialize on `write_gate` so check-then-commit is atomic
//! with respect to other service-level writers.

use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use super::error::DomainError;
use super::model::{Forest, ForestDraft, ForestWithTrees, NewForest, Species, Tree};
use super::repository::{ForestRepository, TreeRepository};

pub struct ForestService {
    repo: Arc<dyn ForestRepository>,
    trees: Arc<dyn TreeRepository>,
    write_gate: Mutex<()>,
}

impl ForestService {
    pub fn new(repo: Arc<dyn ForestRepository>, trees: Arc<dyn TreeRepository>) -> Self {
        Self {
            repo,
            trees,
            write_gate: Mutex::new(()),
        }
    }

    pub fn get(&self, id: Uuid) -> Result<Forest, DomainError> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| DomainError::forest_not_found(id))
    }

    /// Resolves the forest's membership list to full tree records. An empty
    /// list skips the bulk fetch entirely.
    pub fn get_with_trees(&self, id: Uuid) -> Result<ForestWithTrees, DomainError> {
        let forest = self.get(id)?;
        self.resolve(forest)
    }

    pub fn list(&self) -> Result<Vec<ForestWithTrees>, DomainError> {
        self.repo
            .find_all()?
            .into_iter()
            .map(|forest| self.resolve(forest))
            .collect()
    }

    pub fn save(&self, draft: ForestDraft) -> Result<Forest, DomainError> {
        let _guard = self.write_gate.lock();

        if draft.surface <= 0.0 {
            return Err(DomainError::validation("forest surface must be positive"));
        }

        let tree_ids = dedup(draft.tree_ids.unwrap_or_default());
        self.check_trees_availability(&tree_ids, None)?;
        self.check_trees_exist(&tree_ids)?;

        Ok(self.repo.insert(NewForest {
            kind: draft.kind,
            surface: draft.surface,
            tree_ids,
        })?)
    }

    /// Full-replacement update. A tree already owned by this same forest is
    /// not a conflict; an omitted membership list replaces the stored one
    /// with an empty list.
    pub fn update(&self, id: Uuid, draft: ForestDraft) -> Result<Forest, DomainError> {
        let _guard = self.write_gate.lock();

        if self.repo.find_by_id(id)?.is_none() {
            return Err(DomainError::forest_not_found(id));
        }
        if draft.surface <= 0.0 {
            return Err(DomainError::validation("forest surface must be positive"));
        }

        let tree_ids = match draft.tree_ids {
            Some(ids) => {
                let ids = dedup(ids);
                self.check_trees_availability(&ids, Some(id))?;
                self.check_trees_exist(&ids)?;
                ids
            }
            None => Vec::new(),
        };

        Ok(self.repo.update(Forest {
            id,
            kind: draft.kind,
            surface: draft.surface,
            tree_ids,
        })?)
    }

    pub fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.repo.delete(id)?)
    }

    /// Appends a tree to the forest's membership list. Idempotent: adding a
    /// tree that is already a member is a silent no-op.
    pub fn add_tree(&self, forest_id: Uuid, tree_id: Uuid) -> Result<(), DomainError> {
        let _guard = self.write_gate.lock();

        if self.trees.find_by_id(tree_id)?.is_none() {
            return Err(DomainError::tree_not_found(tree_id));
        }
        let mut forest = self.get(forest_id)?;

        if !forest.tree_ids.contains(&tree_id) {
            self.check_trees_availability(&[tree_id], None)?;
            forest.tree_ids.push(tree_id);
            self.repo.update(forest)?;
        }

        Ok(())
    }

    /// Distinct species present in the forest, in first-encountered order.
    /// Tree ids that no longer resolve are skipped.
    pub fn species(&self, forest_id: Uuid) -> Result<Vec<Species>, DomainError> {
        let forest = self.get(forest_id)?;

        let mut species = Vec::new();
        for id in &forest.tree_ids {
            if let Some(tree) = self.trees.find_by_id(*id)? {
                if !species.contains(&tree.species) {
                    species.push(tree.species);
                }
            }
        }
        Ok(species)
    }

    /// The forest's resolved tree records, with the same skip-on-miss
    /// policy as [`Self::species`].
    pub fn trees_of(&self, forest_id: Uuid) -> Result<Vec<Tree>, DomainError> {
        let forest = self.get(forest_id)?;

        let mut trees = Vec::new();
        for id in &forest.tree_ids {
            if let Some(tree) = self.trees.find_by_id(*id)? {
                trees.push(tree);
            }
        }
        Ok(trees)
    }

    fn resolve(&self, forest: Forest) -> Result<ForestWithTrees, DomainError> {
        let trees = if forest.tree_ids.is_empty() {
            Vec::new()
        } else {
            self.trees.find_by_ids(&forest.tree_ids)?
        };

        Ok(ForestWithTrees {
            id: forest.id,
            kind: forest.kind,
            surface: forest.surface,
            trees,
        })
    }

    /// Sole enforcement point of the one-tree-one-forest invariant: fails
    /// with `Conflict` when a candidate tree is held by a forest other than
    /// `exclude_forest_id`.
    fn check_trees_availability(
        &self,
        tree_ids: &[Uuid],
        exclude_forest_id: Option<Uuid>,
    ) -> Result<(), DomainError> {
        for &tree_id in tree_ids {
            if let Some(owner) = self.repo.find_forest_by_tree_id(tree_id)? {
                if exclude_forest_id == Some(owner.id) {
                    continue;
                }
                return Err(DomainError::Conflict {
                    tree_id,
                    forest_id: owner.id,
                });
            }
        }
        Ok(())
    }

    fn check_trees_exist(&self, tree_ids: &[Uuid]) -> Result<(), DomainError> {
        for &tree_id in tree_ids {
            if self.trees.find_by_id(tree_id)?.is_none() {
                return Err(DomainError::tree_not_found(tree_id));
            }
        }
        Ok(())
    }
}

fn dedup(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut out: Vec<Uuid> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}
