use crate::composite::GroupCount;
use crate::dimension::{Accessor, Dimension};
use crate::error::{AidmapError, Result};
use crate::events::{Emitter, FilterEvent, Selection, SubscriptionId};
use crate::filters::Filter;
use crate::model::{Coordinate, Feature};
use crate::widgets::{ProximityControl, LOCATION_ALL, LOCATION_PICKED, LOCATION_USER};

/// Where the proximity origin comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationChoice {
    /// No origin: the filter passes everything.
    All,
    /// The live user location. Treated as `All` until the external
    /// location becomes valid.
    User,
    /// A coordinate picked on the map.
    Picked(Coordinate),
}

/// Filters the dataset to features within a radius of an origin.
///
/// Both a concrete origin and a radius are required for a non-trivial
/// predicate; with the origin unknown the filter stays pass-all.
#[derive(Debug)]
pub struct ProximityFilter {
    name: String,
    dimension: Dimension,
    choice: LocationChoice,
    distance_km: f64,
    user_coordinate: Option<Coordinate>,
    widget: ProximityControl,
    events: Emitter,
}

impl ProximityFilter {
    /// `distance_steps` are the selectable radii, first one selected
    /// initially. An empty or non-positive list is a configuration
    /// error.
    pub fn new(name: impl Into<String>, distance_steps: &[f64]) -> Result<Self> {
        let first = *distance_steps
            .first()
            .ok_or_else(|| AidmapError::MissingOption("proximity distance steps".to_string()))?;
        for km in distance_steps {
            if !km.is_finite() || *km <= 0.0 {
                return Err(AidmapError::InvalidDistance(*km));
            }
        }
        let name = name.into();
        Ok(Self {
            dimension: Dimension::new(name.clone(), Accessor::Location),
            name,
            choice: LocationChoice::All,
            distance_km: first,
            user_coordinate: None,
            widget: ProximityControl::new(distance_steps),
            events: Emitter::new(),
        })
    }

    pub fn choice(&self) -> LocationChoice {
        self.choice
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// The effective origin: `None` while the filter is pass-all.
    pub fn origin(&self) -> Option<Coordinate> {
        match self.choice {
            LocationChoice::All => None,
            LocationChoice::User => self.user_coordinate,
            LocationChoice::Picked(coordinate) => Some(coordinate),
        }
    }

    pub fn widget(&self) -> &ProximityControl {
        &self.widget
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&FilterEvent) + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    pub fn set_location(&mut self, choice: LocationChoice) -> Result<()> {
        if let LocationChoice::Picked(coordinate) = choice {
            if !coordinate.is_valid() {
                return Err(AidmapError::InvalidCoordinate(coordinate.to_string()));
            }
            self.widget.set_picked_value(&coordinate.to_string());
        }
        self.choice = choice;
        self.widget.select_location(match choice {
            LocationChoice::All => LOCATION_ALL,
            LocationChoice::User => LOCATION_USER,
            LocationChoice::Picked(_) => LOCATION_PICKED,
        });
        self.apply();
        Ok(())
    }

    pub fn set_distance(&mut self, km: f64) -> Result<()> {
        if !km.is_finite() || km <= 0.0 {
            return Err(AidmapError::InvalidDistance(km));
        }
        self.distance_km = km;
        self.widget.select_distance(km);
        self.apply();
        Ok(())
    }

    /// Called when the external user location changes. The near-you
    /// widget entry is refreshed in place; if the user location is the
    /// active choice the predicate follows the new origin.
    pub fn user_location_changed(&mut self, coordinate: Coordinate) {
        self.user_coordinate = Some(coordinate);
        self.widget.enable_user_entry(&coordinate.to_string());
        if self.choice == LocationChoice::User {
            self.apply();
        }
    }

    fn selection(&self) -> Selection {
        match self.origin() {
            Some(origin) => Selection::Near {
                origin,
                distance_km: self.distance_km,
            },
            None => Selection::All,
        }
    }

    fn apply(&mut self) {
        match self.origin() {
            None => self.dimension.filter_all(),
            Some(origin) => {
                let km = self.distance_km;
                self.dimension
                    .filter(move |f| origin.distance_km(&f.location) <= km);
            }
        }
        self.events.notify(&FilterEvent::Filter {
            filter: self.name.clone(),
            active: self.selection(),
        });
        self.events.notify(&FilterEvent::Updated {
            filter: self.name.clone(),
        });
    }
}

impl Filter for ProximityFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    fn evaluate(&self, feature: &Feature) -> bool {
        match self.origin() {
            Some(origin) => origin.distance_km(&feature.location) <= self.distance_km,
            None => true,
        }
    }

    fn render(&mut self, _groups: &[GroupCount]) {
        // Location and distance choices are fixed by configuration;
        // there are no data-driven options to refresh.
    }

    fn reset(&mut self) {
        self.choice = LocationChoice::All;
        self.distance_km = self
            .widget
            .distances
            .entries()
            .first()
            .and_then(|e| e.key.parse().ok())
            .unwrap_or(self.distance_km);
        self.dimension.filter_all();
        self.widget.reset();
        self.events.notify(&FilterEvent::Filter {
            filter: self.name.clone(),
            active: Selection::All,
        });
        self.events.notify(&FilterEvent::Updated {
            filter: self.name.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::service;

    const STEPS: [f64; 4] = [5.0, 10.0, 30.0, 50.0];

    // At the equator one degree of latitude is ~111 km, so these
    // offsets from (1,1) sit well inside / outside a 10 km radius.
    fn near_feature() -> Feature {
        service("near", 1.04, 1.0, "FOOD")
    }

    fn far_feature() -> Feature {
        service("far", 1.45, 1.0, "FOOD")
    }

    #[test]
    fn requires_distance_steps() {
        let err = ProximityFilter::new("proximity", &[]).unwrap_err();
        assert!(matches!(err, AidmapError::MissingOption(_)));

        let err = ProximityFilter::new("proximity", &[5.0, -1.0]).unwrap_err();
        assert!(matches!(err, AidmapError::InvalidDistance(_)));
    }

    #[test]
    fn passes_everything_until_an_origin_is_chosen() {
        let filter = ProximityFilter::new("proximity", &STEPS).unwrap();
        assert!(filter.evaluate(&far_feature()));
        assert!(!filter.dimension().is_restricted());
    }

    #[test]
    fn picked_origin_with_radius_includes_near_and_excludes_far() {
        let mut filter = ProximityFilter::new("proximity", &STEPS).unwrap();
        filter
            .set_location(LocationChoice::Picked(Coordinate::new(1.0, 1.0)))
            .unwrap();
        filter.set_distance(10.0).unwrap();

        assert!(filter.evaluate(&near_feature()));
        assert!(!filter.evaluate(&far_feature()));
        assert!(filter.dimension().passes(&near_feature()));
        assert!(!filter.dimension().passes(&far_feature()));
    }

    #[test]
    fn user_choice_is_pass_all_until_the_location_is_valid() {
        let mut filter = ProximityFilter::new("proximity", &STEPS).unwrap();
        filter.set_location(LocationChoice::User).unwrap();
        filter.set_distance(10.0).unwrap();

        // No valid user location yet: everything passes.
        assert!(filter.evaluate(&far_feature()));
        assert!(!filter.dimension().is_restricted());

        filter.user_location_changed(Coordinate::new(1.0, 1.0));
        assert!(filter.evaluate(&near_feature()));
        assert!(!filter.evaluate(&far_feature()));
    }

    #[test]
    fn rejects_bad_distances_and_coordinates() {
        let mut filter = ProximityFilter::new("proximity", &STEPS).unwrap();
        assert!(matches!(
            filter.set_distance(0.0).unwrap_err(),
            AidmapError::InvalidDistance(_)
        ));
        assert!(matches!(
            filter
                .set_location(LocationChoice::Picked(Coordinate::new(99.0, 0.0)))
                .unwrap_err(),
            AidmapError::InvalidCoordinate(_)
        ));
    }

    #[test]
    fn reset_restores_the_defaults() {
        let mut filter = ProximityFilter::new("proximity", &STEPS).unwrap();
        filter
            .set_location(LocationChoice::Picked(Coordinate::new(1.0, 1.0)))
            .unwrap();
        filter.set_distance(30.0).unwrap();

        filter.reset();
        assert_eq!(filter.choice(), LocationChoice::All);
        assert_eq!(filter.distance_km(), 5.0);
        assert!(!filter.dimension().is_restricted());
        assert!(filter.widget().locations.entry(LOCATION_ALL).unwrap().selected);
    }
}
