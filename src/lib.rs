//! # Silva (Forest Inventory & CO2 Absorption)
//!
//! `silva` manages a forest inventory: forests contain trees, each tree has
//! a species and a carbon-storage capacity, and derived ecological metrics
//! (CO2 absorption, surface sizing, car-emission equivalence) are computed
//! from that inventory.
//!
//! ## Ownership Model
//!
//! A tree belongs to at most one forest at a time. Ownership is extrinsic:
//! it lives in the forest's membership list, not on the tree. The forest
//! service enforces the invariant with an availability check before any
//! membership list is committed, on create, update and single-tree
//! addition alike.
//!
//! ## Metrics
//!
//! CO2 absorption sums each tree's carbon-storage capacity and applies a
//! species-diversity bonus of 5% per distinct species. Surface sizing and
//! car-emission equivalence derive from that figure; no rounding is applied
//! anywhere in the domain.
//!
//! ## Layout
//!
//! - [`domain`]: models, services and the CO2 calculator.
//! - [`storage`]: in-memory repositories behind the domain's traits.
//! - [`api`]: axum router, OpenAPI document and Swagger UI.
//! - [`cli`]: argument parsing, telemetry and the server action.

pub mod api;
pub mod cli;
pub mod domain;
pub mod storage;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        // Should be a hex string (full SHA-1 is 40 chars, but could be short)
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
