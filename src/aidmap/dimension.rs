use crate::model::Feature;

/// Maps a feature to its grouping key for one dimension.
///
/// Accessors are pure and total: a feature that lacks the configured
/// property yields the empty value instead of an error, so every
/// feature always lands in exactly one group.
#[derive(Debug, Clone)]
pub enum Accessor {
    /// A string property, with a fallback label for features without it.
    Property { key: String, empty: String },
    /// The feature's `"lat,lng"` location string.
    Location,
}

impl Accessor {
    pub fn key_of(&self, feature: &Feature) -> String {
        match self {
            Accessor::Property { key, empty } => {
                feature.label(key).unwrap_or(empty.as_str()).to_string()
            }
            Accessor::Location => feature.location.to_string(),
        }
    }
}

type Predicate = Box<dyn Fn(&Feature) -> bool>;

/// One filterable facet over the feature store.
///
/// A dimension holds at most one active predicate at a time. Setting a
/// new one replaces the old (never stacks), and [`Dimension::filter_all`]
/// returns to the initial pass-all state. A dimension with no predicate
/// is `idle` and never excludes anything from the composite view.
pub struct Dimension {
    name: String,
    accessor: Accessor,
    predicate: Option<Predicate>,
}

impl std::fmt::Debug for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dimension")
            .field("name", &self.name)
            .field("accessor", &self.accessor)
            .field("predicate", &self.predicate.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Dimension {
    /// New idle dimension. Must exist (idle) before it participates in
    /// a composite recompute.
    pub fn new(name: impl Into<String>, accessor: Accessor) -> Self {
        Self {
            name: name.into(),
            accessor,
            predicate: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }

    pub fn key_of(&self, feature: &Feature) -> String {
        self.accessor.key_of(feature)
    }

    /// Drop the active predicate: back to pass-all.
    pub fn filter_all(&mut self) {
        self.predicate = None;
    }

    /// Install a predicate, replacing any previous one.
    pub fn filter(&mut self, predicate: impl Fn(&Feature) -> bool + 'static) {
        self.predicate = Some(Box::new(predicate));
    }

    pub fn is_restricted(&self) -> bool {
        self.predicate.is_some()
    }

    pub fn passes(&self, feature: &Feature) -> bool {
        match &self.predicate {
            Some(predicate) => predicate(feature),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinate;

    fn feature(activity: Option<&str>) -> Feature {
        let base = Feature::new("f", Coordinate::new(1.0, 2.0));
        match activity {
            Some(a) => base.with_property("activityName", a),
            None => base,
        }
    }

    fn activity_accessor() -> Accessor {
        Accessor::Property {
            key: "activityName".to_string(),
            empty: "Other".to_string(),
        }
    }

    #[test]
    fn idle_dimension_passes_everything() {
        let dim = Dimension::new("activityName", activity_accessor());
        assert!(!dim.is_restricted());
        assert!(dim.passes(&feature(Some("FOOD"))));
        assert!(dim.passes(&feature(None)));
    }

    #[test]
    fn accessor_substitutes_the_empty_value() {
        let dim = Dimension::new("activityName", activity_accessor());
        assert_eq!(dim.key_of(&feature(Some("FOOD"))), "FOOD");
        assert_eq!(dim.key_of(&feature(None)), "Other");
    }

    #[test]
    fn location_accessor_formats_lat_lng() {
        let dim = Dimension::new("proximity", Accessor::Location);
        assert_eq!(dim.key_of(&feature(None)), "1,2");
    }

    #[test]
    fn setting_a_predicate_replaces_the_previous_one() {
        let mut dim = Dimension::new("activityName", activity_accessor());

        dim.filter(|f| f.label("activityName") == Some("FOOD"));
        assert!(dim.is_restricted());
        assert!(dim.passes(&feature(Some("FOOD"))));
        assert!(!dim.passes(&feature(Some("WASH"))));

        // Replacement, not stacking: the FOOD restriction is gone.
        dim.filter(|f| f.label("activityName") == Some("WASH"));
        assert!(dim.passes(&feature(Some("WASH"))));
        assert!(!dim.passes(&feature(Some("FOOD"))));

        dim.filter_all();
        assert!(dim.passes(&feature(Some("FOOD"))));
    }
}
