//! Tree domain service: validates and mutates individual trees.

use std::sync::Arc;

use uuid::Uuid;

use super::error::DomainError;
use super::model::{NewTree, Tree, TreeDraft};
use super::repository::TreeRepository;

pub struct TreeService {
    repo: Arc<dyn TreeRepository>,
}

impl TreeService {
    pub fn new(repo: Arc<dyn TreeRepository>) -> Self {
        Self { repo }
    }

    pub fn get(&self, id: Uuid) -> Result<Tree, DomainError> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| DomainError::tree_not_found(id))
    }

    pub fn list(&self) -> Result<Vec<Tree>, DomainError> {
        Ok(self.repo.find_all()?)
    }

    pub fn save(&self, draft: TreeDraft) -> Result<Tree, DomainError> {
        let record = validate(draft)?;
        Ok(self.repo.insert(record)?)
    }

    /// Full-replacement update. The stored identity is `id` regardless of
    /// anything embedded in the input.
    pub fn update(&self, id: Uuid, draft: TreeDraft) -> Result<Tree, DomainError> {
        if self.repo.find_by_id(id)?.is_none() {
            return Err(DomainError::tree_not_found(id));
        }
        let record = validate(draft)?;
        let tree = Tree {
            id,
            birth: record.birth,
            species: record.species,
            exposure: record.exposure,
            carbon_storage_capacity: record.carbon_storage_capacity,
        };
        Ok(self.repo.update(tree)?)
    }

    /// Returns whether a record existed and was removed; a missing id is
    /// not an error.
    pub fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.repo.delete(id)?)
    }
}

fn validate(draft: TreeDraft) -> Result<NewTree, DomainError> {
    let birth = draft
        .birth
        .ok_or_else(|| DomainError::validation("tree birth date cannot be null"))?;

    Ok(NewTree {
        birth,
        species: draft.species,
        exposure: draft.exposure,
        carbon_storage_capacity: draft.carbon_storage_capacity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Exposure, Species};
    use crate::storage::memory::MemoryTreeRepository;
    use chrono::{TimeZone, Utc};

    fn service() -> TreeService {
        TreeService::new(Arc::new(MemoryTreeRepository::new()))
    }

    fn draft(capacity: f64) -> TreeDraft {
        TreeDraft {
            birth: Some(Utc.with_ymd_and_hms(2020, 3, 1, 0, 0, 0).unwrap()),
            species: Species::Oak,
            exposure: Exposure::Sun,
            carbon_storage_capacity: capacity,
        }
    }

    #[test]
    fn save_assigns_identity() {
        let service = service();
        let tree = service.save(draft(1.5)).unwrap();
        let fetched = service.get(tree.id).unwrap();
        assert_eq!(fetched, tree);
    }

    #[test]
    fn save_rejects_missing_birth() {
        let service = service();
        let mut input = draft(1.5);
        input.birth = None;
        let err = service.save(input).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn get_unknown_is_not_found() {
        let err = service().get(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, DomainError::NotFound { resource: "tree", .. }));
    }

    #[test]
    fn update_forces_identity_and_replaces() {
        let service = service();
        let tree = service.save(draft(1.5)).unwrap();

        let updated = service.update(tree.id, draft(9.0)).unwrap();
        assert_eq!(updated.id, tree.id);
        assert!((updated.carbon_storage_capacity - 9.0).abs() < f64::EPSILON);
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn update_unknown_is_not_found() {
        let err = service().update(Uuid::new_v4(), draft(1.0)).unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[test]
    fn update_rejects_missing_birth() {
        let service = service();
        let tree = service.save(draft(1.5)).unwrap();
        let mut input = draft(2.0);
        input.birth = None;
        let err = service.update(tree.id, input).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn delete_reports_existence() {
        let service = service();
        let tree = service.save(draft(1.5)).unwrap();
        assert!(service.delete(tree.id).unwrap());
        assert!(!service.delete(tree.id).unwrap());
    }
}
