use crate::composite::GroupCount;
use crate::dimension::{Accessor, Dimension};
use crate::error::{AidmapError, Result};
use crate::events::{Emitter, FilterEvent, Selection, SubscriptionId};
use crate::filters::{Filter, SelectionMode};
use crate::model::Feature;
use crate::widgets::{OptionList, ALL_KEY};
use geo::{Contains, MultiPolygon, Point};
use std::collections::{BTreeSet, HashMap};

pub type RegionId = String;

/// A selectable administrative region: id, display name, and polygon
/// boundary.
#[derive(Debug, Clone)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub boundary: MultiPolygon<f64>,
}

/// Visual class of a region shape, derived purely from selection and
/// hover state. Presentation only — not part of the filtering logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    Default,
    Hovered,
    Selected,
}

impl VisualState {
    /// The shape opacity a map renderer should use.
    pub fn opacity(self) -> f64 {
        match self {
            VisualState::Default => 0.3,
            VisualState::Hovered => 0.5,
            VisualState::Selected => 0.7,
        }
    }
}

/// Filters the dataset to features inside the selected region
/// polygons. A feature passes when it is inside at least one selected
/// region; no selection passes everything.
pub struct RegionFilter {
    name: String,
    mode: SelectionMode,
    dimension: Dimension,
    regions: Vec<Region>,
    by_id: HashMap<RegionId, usize>,
    active: BTreeSet<RegionId>,
    hovered: Option<RegionId>,
    widget: OptionList,
    events: Emitter,
}

impl RegionFilter {
    pub fn new(name: impl Into<String>, mode: SelectionMode, all: bool) -> Self {
        let name = name.into();
        let mut widget = OptionList::new(name.clone(), mode, all && mode == SelectionMode::And);
        if all && mode == SelectionMode::And {
            // Radio widgets carry the clearing "All" choice up front.
            widget.ensure_entry(ALL_KEY, ALL_KEY).selected = true;
        }
        Self {
            dimension: Dimension::new(name.clone(), Accessor::Location),
            name,
            mode,
            regions: Vec::new(),
            by_id: HashMap::new(),
            active: BTreeSet::new(),
            hovered: None,
            widget,
            events: Emitter::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn get(&self, id: &str) -> Option<&Region> {
        self.by_id.get(id).map(|&i| &self.regions[i])
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    pub fn active(&self) -> &BTreeSet<RegionId> {
        &self.active
    }

    pub fn widget(&self) -> &OptionList {
        &self.widget
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&FilterEvent) + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    /// Register region boundaries as they arrive from the polygon
    /// layer. May be called repeatedly; known ids are skipped and new
    /// widget entries are appended without disturbing existing ones.
    pub fn add_regions(&mut self, regions: Vec<Region>) {
        for region in regions {
            if self.by_id.contains_key(&region.id) {
                continue;
            }
            self.widget.ensure_entry(&region.id, &region.name);
            self.by_id.insert(region.id.clone(), self.regions.len());
            self.regions.push(region);
        }
    }

    /// A click on a region shape or its widget entry. Radio mode
    /// clears every other selection first; checkbox mode accumulates.
    /// Returns whether the region is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        if !self.by_id.contains_key(id) {
            return Err(AidmapError::UnknownRegion(id.to_string()));
        }
        let selected = match self.mode {
            SelectionMode::And => {
                self.active.clear();
                self.active.insert(id.to_string());
                true
            }
            SelectionMode::Or => {
                if self.active.remove(id) {
                    false
                } else {
                    self.active.insert(id.to_string());
                    true
                }
            }
        };
        self.apply();
        Ok(selected)
    }

    /// The "All" choice: drop every region selection.
    pub fn clear(&mut self) {
        self.active.clear();
        self.apply();
    }

    pub fn hover(&mut self, id: Option<&str>) -> Result<()> {
        if let Some(id) = id {
            if !self.by_id.contains_key(id) {
                return Err(AidmapError::UnknownRegion(id.to_string()));
            }
        }
        self.hovered = id.map(str::to_string);
        Ok(())
    }

    /// Visual class for one region shape.
    pub fn visual_state(&self, id: &str) -> VisualState {
        if self.active.contains(id) {
            VisualState::Selected
        } else if self.hovered.as_deref() == Some(id) {
            VisualState::Hovered
        } else {
            VisualState::Default
        }
    }

    fn selection(&self) -> Selection {
        if self.active.is_empty() {
            Selection::All
        } else {
            Selection::Regions(self.active.clone())
        }
    }

    fn apply(&mut self) {
        if self.active.is_empty() {
            self.dimension.filter_all();
        } else {
            let boundaries: Vec<MultiPolygon<f64>> = self
                .active
                .iter()
                .filter_map(|id| self.get(id).map(|r| r.boundary.clone()))
                .collect();
            self.dimension.filter(move |f| {
                let point = Point::new(f.location.lng, f.location.lat);
                boundaries.iter().any(|b| b.contains(&point))
            });
        }
        self.widget
            .set_selected_keys(self.active.iter().map(String::as_str).collect::<Vec<_>>());
        self.events.notify(&FilterEvent::Filter {
            filter: self.name.clone(),
            active: self.selection(),
        });
        self.events.notify(&FilterEvent::Updated {
            filter: self.name.clone(),
        });
    }
}

impl Filter for RegionFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    fn evaluate(&self, feature: &Feature) -> bool {
        if self.active.is_empty() {
            return true;
        }
        let point = Point::new(feature.location.lng, feature.location.lat);
        self.active
            .iter()
            .filter_map(|id| self.get(id))
            .any(|r| r.boundary.contains(&point))
    }

    fn render(&mut self, _groups: &[GroupCount]) {
        // Entries track the polygon layer, not the feature data; they
        // are maintained by add_regions.
    }

    fn reset(&mut self) {
        self.active.clear();
        self.hovered = None;
        self.dimension.filter_all();
        self.widget.clear_selection();
        self.events.notify(&FilterEvent::Filter {
            filter: self.name.clone(),
            active: Selection::All,
        });
        self.events.notify(&FilterEvent::Updated {
            filter: self.name.clone(),
        });
    }
}
