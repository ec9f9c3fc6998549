//! CO2 absorption calculator.
//!
//! Pure functions over a forest and its already-resolved tree list; no
//! repository access, no rounding. Presentation-layer rounding, if any, is
//! the caller's responsibility.

use super::error::DomainError;
use super::model::{Forest, Tree};

/// Bonus applied per distinct species present in the tree set.
pub const DIVERSITY_FACTOR: f64 = 0.05;

/// Average yearly CO2 emission of a car, in the same unit as
/// `carbon_storage_capacity`.
pub const AVG_CAR_EMISSION: f64 = 2000.0;

/// Total yearly CO2 absorption of the tree set: the sum of carbon-storage
/// capacities scaled by `1 + distinct_species * DIVERSITY_FACTOR`.
///
/// The forest is accepted for interface symmetry (future forest-type
/// factors) and is not read.
pub fn absorption(_forest: &Forest, trees: &[Tree]) -> f64 {
    if trees.is_empty() {
        return 0.0;
    }

    let mut base = 0.0;
    let mut species = Vec::new();
    for tree in trees {
        base += tree.carbon_storage_capacity;
        if !species.contains(&tree.species) {
            species.push(tree.species);
        }
    }

    let diversity_multiplier = 1.0 + species.len() as f64 * DIVERSITY_FACTOR;

    base * diversity_multiplier
}

/// Surface required to absorb `target_co2` at the forest's current
/// absorption rate per unit of surface.
pub fn surface_needed(forest: &Forest, trees: &[Tree], target_co2: f64) -> Result<f64, DomainError> {
    let current = absorption(forest, trees);
    if current <= 0.0 || forest.surface <= 0.0 {
        return Err(DomainError::validation(
            "cannot calculate needed surface based on an empty or zero-surface forest",
        ));
    }

    let absorption_per_unit_surface = current / forest.surface;
    Ok(target_co2 / absorption_per_unit_surface)
}

/// Number of average cars whose yearly emissions the tree set absorbs.
pub fn equivalent_in_cars(forest: &Forest, trees: &[Tree]) -> f64 {
    absorption(forest, trees) / AVG_CAR_EMISSION
}
