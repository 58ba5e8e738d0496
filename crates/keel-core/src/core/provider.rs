//! Boundary traits through which collaborators supply calculation inputs.
//!
//! The core has no persistence of its own: vessels and loadcases live in
//! whatever store the embedding application uses. These traits are the seam —
//! a provider returns a validated, internally consistent snapshot (monotonic
//! stations/waterlines, non-negative offsets) or `None` when the identifier
//! is unknown. The workflow layer maps a miss to the corresponding
//! not-found error.

use super::models::geometry::HullGeometry;
use super::models::loading::LoadingCondition;
use std::collections::BTreeMap;

/// Supplies hull geometry snapshots by vessel identifier.
pub trait GeometrySource {
    fn hull_geometry(&self, vessel: &str) -> Option<HullGeometry>;
}

/// Supplies loading conditions by loadcase identifier.
pub trait LoadingSource {
    fn loading_condition(&self, loadcase: &str) -> Option<LoadingCondition>;
}

/// A map-backed store implementing both provider traits.
///
/// Suitable for tests, sample data, and embedders without a database.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    geometries: BTreeMap<String, HullGeometry>,
    loadings: BTreeMap<String, LoadingCondition>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_geometry(&mut self, vessel: impl Into<String>, geometry: HullGeometry) {
        self.geometries.insert(vessel.into(), geometry);
    }

    pub fn insert_loading(&mut self, loadcase: impl Into<String>, loading: LoadingCondition) {
        self.loadings.insert(loadcase.into(), loading);
    }
}

impl GeometrySource for InMemoryStore {
    fn hull_geometry(&self, vessel: &str) -> Option<HullGeometry> {
        self.geometries.get(vessel).cloned()
    }
}

impl LoadingSource for InMemoryStore {
    fn loading_condition(&self, loadcase: &str) -> Option<LoadingCondition> {
        self.loadings.get(loadcase).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures;

    #[test]
    fn store_round_trips_geometry_and_loading() {
        let mut store = InMemoryStore::new();
        store.insert_geometry("barge", fixtures::rectangular_barge(60.0, 10.0, 4.0, 11, 9));
        store.insert_loading("departure", LoadingCondition::seawater("departure", 3.0));

        assert!(store.hull_geometry("barge").is_some());
        assert!(store.loading_condition("departure").is_some());
    }

    #[test]
    fn unknown_identifiers_return_none() {
        let store = InMemoryStore::new();

        assert!(store.hull_geometry("ghost").is_none());
        assert!(store.loading_condition("ghost").is_none());
    }
}
