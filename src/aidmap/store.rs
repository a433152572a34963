use crate::model::{Feature, FeatureId};
use std::collections::HashMap;
use tracing::warn;

/// Append-only, in-memory collection of features keyed by stable id.
///
/// Data may arrive in several batches (the loader feeds whatever it has
/// as it has it); the store is valid and queryable at every point in
/// between. Records are never mutated or removed within a session.
#[derive(Default)]
pub struct FeatureStore {
    features: Vec<Feature>,
    by_id: HashMap<FeatureId, usize>,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch, returning how many records were actually added.
    /// Ids already present are skipped: ids are stable for the lifetime
    /// of a session, so a re-sent record is the same record.
    pub fn add(&mut self, batch: Vec<Feature>) -> usize {
        let mut added = 0;
        for feature in batch {
            if self.by_id.contains_key(&feature.id) {
                warn!(id = %feature.id, "duplicate feature id skipped");
                continue;
            }
            self.by_id.insert(feature.id.clone(), self.features.len());
            self.features.push(feature);
            added += 1;
        }
        added
    }

    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.by_id.get(id).map(|&i| &self.features[i])
    }

    /// Features in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Coordinate;

    /// A minimal service-point feature for tests.
    pub fn service(id: &str, lat: f64, lng: f64, activity: &str) -> Feature {
        Feature::new(id, Coordinate::new(lat, lng)).with_property("activityName", activity)
    }

    #[derive(Default)]
    pub struct StoreFixture {
        pub store: FeatureStore,
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_feature(mut self, feature: Feature) -> Self {
            self.store.add(vec![feature]);
            self
        }

        pub fn with_service(self, id: &str, lat: f64, lng: f64, activity: &str) -> Self {
            self.with_feature(service(id, lat, lng, activity))
        }
    }
}
