//! The composite view: what is visible once every dimension has had
//! its say, and the cross-filtered group counts that drive the widgets.
//!
//! Nothing here is stored — both queries recompute from the store and
//! the dimensions' current predicates, so they are safe to re-run at
//! any time, including while data is still arriving.

use crate::dimension::Dimension;
use crate::model::{Feature, FeatureId};
use crate::store::FeatureStore;
use std::collections::BTreeMap;

/// One option row for a filter widget: a distinct key and the number
/// of features carrying it within the cross-filtered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

fn passes_all(feature: &Feature, dimensions: &[&Dimension]) -> bool {
    dimensions.iter().all(|d| d.passes(feature))
}

/// Ids of the features passing every dimension's predicate, in store
/// order. An idle dimension never excludes anything.
pub fn visible_ids(store: &FeatureStore, dimensions: &[&Dimension]) -> Vec<FeatureId> {
    store
        .iter()
        .filter(|f| passes_all(f, dimensions))
        .map(|f| f.id.clone())
        .collect()
}

/// Distinct keys of `target`, counted over the features that pass every
/// *other* dimension.
///
/// This is the defining invariant of faceted filtering: a widget's
/// counts reflect the rest of the filters' restrictions — never the
/// target's own selection, and never the unfiltered store. The counts
/// therefore sum to the size of the others-only intersection.
pub fn groups(
    store: &FeatureStore,
    dimensions: &[&Dimension],
    target: &Dimension,
) -> Vec<GroupCount> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for feature in store.iter() {
        let others_pass = dimensions
            .iter()
            .filter(|d| d.name() != target.name())
            .all(|d| d.passes(feature));
        if others_pass {
            *counts.entry(target.key_of(feature)).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|(key, count)| GroupCount { key, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Accessor;
    use crate::store::fixtures::{service, StoreFixture};

    fn category_dimension(key: &str) -> Dimension {
        Dimension::new(
            key,
            Accessor::Property {
                key: key.to_string(),
                empty: String::new(),
            },
        )
    }

    fn sample_store() -> FeatureStore {
        StoreFixture::new()
            .with_feature(service("a", 1.0, 1.0, "FOOD").with_property("partnerName", "ACF"))
            .with_feature(service("b", 2.0, 2.0, "WASH").with_property("partnerName", "ACF"))
            .with_feature(service("c", 3.0, 3.0, "HEALTH").with_property("partnerName", "IMC"))
            .with_feature(service("d", 4.0, 4.0, "FOOD").with_property("partnerName", "IMC"))
            .store
    }

    #[test]
    fn idle_dimensions_exclude_nothing() {
        let store = sample_store();
        let activity = category_dimension("activityName");
        let partner = category_dimension("partnerName");

        let ids = visible_ids(&store, &[&activity, &partner]);
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn visible_set_is_the_intersection_of_all_dimensions() {
        let store = sample_store();
        let mut activity = category_dimension("activityName");
        let mut partner = category_dimension("partnerName");

        activity.filter(|f| f.label("activityName") == Some("FOOD"));
        partner.filter(|f| f.label("partnerName") == Some("IMC"));

        let ids = visible_ids(&store, &[&activity, &partner]);
        assert_eq!(ids, vec!["d"]);
    }

    #[test]
    fn groups_ignore_the_target_dimension_own_filter() {
        let store = sample_store();
        let mut activity = category_dimension("activityName");
        let partner = category_dimension("partnerName");

        // Restricting the activity dimension must not change its own
        // displayed option counts.
        activity.filter(|f| f.label("activityName") == Some("FOOD"));

        let counts = groups(&store, &[&activity, &partner], &activity);
        assert_eq!(
            counts,
            vec![
                GroupCount {
                    key: "FOOD".to_string(),
                    count: 2
                },
                GroupCount {
                    key: "HEALTH".to_string(),
                    count: 1
                },
                GroupCount {
                    key: "WASH".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn groups_reflect_the_other_dimensions_restrictions() {
        let store = sample_store();
        let activity = category_dimension("activityName");
        let mut partner = category_dimension("partnerName");

        partner.filter(|f| f.label("partnerName") == Some("ACF"));

        let counts = groups(&store, &[&activity, &partner], &activity);
        assert_eq!(
            counts,
            vec![
                GroupCount {
                    key: "FOOD".to_string(),
                    count: 1
                },
                GroupCount {
                    key: "WASH".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn group_counts_sum_to_the_others_intersection() {
        let store = sample_store();
        let mut activity = category_dimension("activityName");
        let mut partner = category_dimension("partnerName");

        activity.filter(|f| f.label("activityName") == Some("FOOD"));
        partner.filter(|f| f.label("partnerName") == Some("IMC"));

        // For the activity widget: only the partner restriction applies.
        let counts = groups(&store, &[&activity, &partner], &activity);
        let total: usize = counts.iter().map(|g| g.count).sum();

        let others_only = visible_ids(&store, &[&partner]);
        assert_eq!(total, others_only.len());
    }
}
