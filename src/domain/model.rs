//! Inventory records and mutation inputs.
//!
//! Wire names follow the public API: camelCase fields, SCREAMING_SNAKE_CASE
//! enum values. Drafts carry what a client may send; `NewTree`/`NewForest`
//! are the validated records a repository turns into stored rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Species {
    Oak,
    Ash,
    Beech,
    Birch,
    Pine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Exposure {
    Sun,
    MidShadow,
    Shadow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForestType {
    Temperate,
    Tropical,
    Boreal,
    Mediterranean,
}

/// A stored tree. Identity is assigned by the repository on insert and
/// stable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tree {
    pub id: Uuid,
    pub birth: DateTime<Utc>,
    pub species: Species,
    pub exposure: Exposure,
    /// Tonnes of CO2 per year this tree can store.
    pub carbon_storage_capacity: f64,
}

/// Client-supplied tree payload. `birth` presence is a domain rule checked
/// by [`crate::domain::TreeService`], not by request parsing.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TreeDraft {
    pub birth: Option<DateTime<Utc>>,
    pub species: Species,
    pub exposure: Exposure,
    pub carbon_storage_capacity: f64,
}

/// A validated tree record awaiting identity assignment.
#[derive(Debug, Clone)]
pub struct NewTree {
    pub birth: DateTime<Utc>,
    pub species: Species,
    pub exposure: Exposure,
    pub carbon_storage_capacity: f64,
}

/// A stored forest. Membership is the `tree_ids` list; a tree id may appear
/// in at most one forest at a time, enforced by the service layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Forest {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ForestType,
    pub surface: f64,
    pub tree_ids: Vec<Uuid>,
}

/// Client-supplied forest payload. A missing `tree_ids` list is normalized
/// to empty by the service.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForestDraft {
    #[serde(rename = "type")]
    pub kind: ForestType,
    pub surface: f64,
    pub tree_ids: Option<Vec<Uuid>>,
}

/// A validated forest record awaiting identity assignment.
#[derive(Debug, Clone)]
pub struct NewForest {
    pub kind: ForestType,
    pub surface: f64,
    pub tree_ids: Vec<Uuid>,
}

/// A forest with its membership resolved to full tree records. Built on
/// demand, never persisted.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForestWithTrees {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ForestType,
    pub surface: f64,
    pub trees: Vec<Tree>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_wire_values() {
        assert_eq!(
            serde_json::to_string(&Species::Oak).expect("serialize"),
            "\"OAK\""
        );
        assert_eq!(
            serde_json::to_string(&Exposure::MidShadow).expect("serialize"),
            "\"MID_SHADOW\""
        );
        assert_eq!(
            serde_json::to_string(&ForestType::Temperate).expect("serialize"),
            "\"TEMPERATE\""
        );
    }

    #[test]
    fn forest_draft_accepts_missing_tree_ids() {
        let draft: ForestDraft =
            serde_json::from_str(r#"{"type": "TROPICAL", "surface": 12.5}"#).expect("deserialize");
        assert!(draft.tree_ids.is_none());
        assert_eq!(draft.kind, ForestType::Tropical);
    }

    #[test]
    fn tree_wire_field_names() {
        let json = r#"{
            "birth": "2020-03-01T00:00:00Z",
            "species": "ASH",
            "exposure": "SUN",
            "carbonStorageCapacity": 2.5
        }"#;
        let draft: TreeDraft = serde_json::from_str(json).expect("deserialize");
        assert!(draft.birth.is_some());
        assert_eq!(draft.species, Species::Ash);
        assert!((draft.carbon_storage_capacity - 2.5).abs() < f64::EPSILON);
    }
}
