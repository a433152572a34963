//! The explorer facade: one object owning the feature store, the
//! filter controllers, and the current composite view.
//!
//! Every mutation runs the full cycle synchronously before returning:
//! update the controller's predicate, recompute the intersection,
//! re-render every widget from cross-filtered counts, notify. There is
//! no way to observe a partial cycle — `&mut self` serializes inputs.

use crate::composite::{self, GroupCount};
use crate::config::ExplorerConfig;
use crate::dimension::Dimension;
use crate::error::{AidmapError, Result};
use crate::events::{Emitter, FilterEvent, SubscriptionId};
use crate::filters::{
    CategoryFilter, Filter, LocationChoice, ProximityFilter, Region, RegionFilter, SelectionMode,
};
use crate::model::{Coordinate, Feature, FeatureId};
use crate::store::FeatureStore;
use crate::user_location::UserLocation;
use std::collections::BTreeSet;
use tracing::debug;

pub struct Explorer {
    store: FeatureStore,
    categories: Vec<CategoryFilter>,
    proximity: ProximityFilter,
    region: RegionFilter,
    user_location: UserLocation,
    visible: Vec<FeatureId>,
    events: Emitter,
}

impl Explorer {
    pub fn new(config: &ExplorerConfig) -> Result<Self> {
        let categories = config
            .categories
            .iter()
            .map(|def| {
                let mode = SelectionMode::parse(&def.mode)?;
                Ok(CategoryFilter::new(
                    &def.key,
                    &def.key,
                    def.empty.clone(),
                    mode,
                    def.all,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        let proximity = ProximityFilter::new("proximity", &config.distances)?;
        let region = RegionFilter::new(
            "region",
            SelectionMode::parse(&config.region.mode)?,
            config.region.all,
        );

        Ok(Self {
            store: FeatureStore::new(),
            categories,
            proximity,
            region,
            user_location: UserLocation::new(),
            visible: Vec::new(),
            events: Emitter::new(),
        })
    }

    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    pub fn category(&self, name: &str) -> Option<&CategoryFilter> {
        self.categories.iter().find(|c| c.name() == name)
    }

    pub fn categories(&self) -> &[CategoryFilter] {
        &self.categories
    }

    pub fn proximity(&self) -> &ProximityFilter {
        &self.proximity
    }

    pub fn region(&self) -> &RegionFilter {
        &self.region
    }

    pub fn user_location(&self) -> &UserLocation {
        &self.user_location
    }

    /// Notified once per completed update cycle.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&FilterEvent) + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    /// Ingest a batch of features. Safe to call repeatedly as data
    /// arrives; the view and all counts are re-derived each time.
    pub fn add_features(&mut self, batch: Vec<Feature>) -> usize {
        let added = self.store.add(batch);
        self.refresh();
        added
    }

    /// Register region polygons as the region layer supplies them.
    pub fn add_regions(&mut self, regions: Vec<Region>) {
        self.region.add_regions(regions);
        self.refresh();
    }

    /// Replace a category filter's active label set.
    pub fn set_category(&mut self, name: &str, labels: BTreeSet<String>) -> Result<()> {
        let filter = self
            .categories
            .iter_mut()
            .find(|c| c.name() == name)
            .ok_or_else(|| AidmapError::UnknownFilter(name.to_string()))?;
        filter.set_active(labels)?;
        self.refresh();
        Ok(())
    }

    /// Toggle one label of a category filter (a checkbox/radio click).
    pub fn toggle_category(&mut self, name: &str, label: &str) -> Result<()> {
        let filter = self
            .categories
            .iter_mut()
            .find(|c| c.name() == name)
            .ok_or_else(|| AidmapError::UnknownFilter(name.to_string()))?;
        filter.toggle(label);
        self.refresh();
        Ok(())
    }

    pub fn set_proximity_location(&mut self, choice: LocationChoice) -> Result<()> {
        self.proximity.set_location(choice)?;
        self.refresh();
        Ok(())
    }

    pub fn set_proximity_distance(&mut self, km: f64) -> Result<()> {
        self.proximity.set_distance(km)?;
        self.refresh();
        Ok(())
    }

    pub fn toggle_region(&mut self, id: &str) -> Result<bool> {
        let selected = self.region.toggle(id)?;
        self.refresh();
        Ok(selected)
    }

    pub fn clear_regions(&mut self) {
        self.region.clear();
        self.refresh();
    }

    /// Hover is visual only; no recompute happens.
    pub fn hover_region(&mut self, id: Option<&str>) -> Result<()> {
        self.region.hover(id)
    }

    /// Feed the external user location. The proximity control's
    /// near-you entry is refreshed in place, and if "near you" is the
    /// active choice the view follows.
    pub fn set_user_location(&mut self, coordinate: Coordinate) -> Result<()> {
        self.user_location.set(coordinate)?;
        self.proximity.user_location_changed(coordinate);
        self.refresh();
        Ok(())
    }

    /// Return every filter to idle and clear all widget selection.
    pub fn reset(&mut self) {
        for filter in self.filters_mut() {
            filter.reset();
        }
        self.refresh();
    }

    /// Ids of the currently visible features, in store order.
    pub fn visible_ids(&self) -> &[FeatureId] {
        &self.visible
    }

    /// The currently visible features.
    pub fn visible(&self) -> Vec<&Feature> {
        self.visible
            .iter()
            .filter_map(|id| self.store.get(id))
            .collect()
    }

    /// Cross-filtered option counts for one filter: every other
    /// filter's restriction applies, the named filter's own does not.
    pub fn groups(&self, name: &str) -> Result<Vec<GroupCount>> {
        let filters = self.filters();
        let target = filters
            .iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| AidmapError::UnknownFilter(name.to_string()))?;
        let dims: Vec<&Dimension> = filters.iter().map(|f| f.dimension()).collect();
        Ok(composite::groups(&self.store, &dims, target.dimension()))
    }

    fn filters(&self) -> Vec<&dyn Filter> {
        let mut all: Vec<&dyn Filter> =
            self.categories.iter().map(|c| c as &dyn Filter).collect();
        all.push(&self.proximity);
        all.push(&self.region);
        all
    }

    fn filters_mut(&mut self) -> Vec<&mut dyn Filter> {
        let mut all: Vec<&mut dyn Filter> = self
            .categories
            .iter_mut()
            .map(|c| c as &mut dyn Filter)
            .collect();
        all.push(&mut self.proximity);
        all.push(&mut self.region);
        all
    }

    /// The second half of every update cycle: recompute the visible
    /// intersection and re-render every widget. All widgets, not just
    /// the one that changed — each widget's counts depend on all the
    /// *other* filters.
    fn refresh(&mut self) {
        let (visible, group_sets) = {
            let filters = self.filters();
            let dims: Vec<&Dimension> = filters.iter().map(|f| f.dimension()).collect();
            let visible = composite::visible_ids(&self.store, &dims);
            let group_sets: Vec<Vec<GroupCount>> = filters
                .iter()
                .map(|f| composite::groups(&self.store, &dims, f.dimension()))
                .collect();
            (visible, group_sets)
        };

        self.visible = visible;
        for (filter, groups) in self.filters_mut().into_iter().zip(group_sets.iter()) {
            filter.render(groups);
        }

        debug!(visible = self.visible.len(), total = self.store.len(), "view recomputed");
        self.events.notify(&FilterEvent::Updated {
            filter: "view".to_string(),
        });
    }
}
