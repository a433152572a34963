use crate::composite::GroupCount;
use crate::dimension::{Accessor, Dimension};
use crate::error::{AidmapError, Result};
use crate::events::{Emitter, FilterEvent, Selection, SubscriptionId};
use crate::filters::{Filter, SelectionMode};
use crate::model::Feature;
use crate::widgets::OptionList;
use std::collections::BTreeSet;

/// Filters the dataset by a category-like property: activity name,
/// partner name, referral requirement.
///
/// The active state is a set of labels. An empty set means no
/// restriction — an empty selection must never hide everything. In
/// `And` (radio) mode at most one label may be active at a time.
pub struct CategoryFilter {
    name: String,
    mode: SelectionMode,
    dimension: Dimension,
    active: BTreeSet<String>,
    widget: OptionList,
    events: Emitter,
}

impl CategoryFilter {
    /// `key` is the property the filter groups by; features lacking it
    /// group under `empty` (default: the empty label). `all` adds the
    /// synthetic "All" first entry to radio widgets.
    pub fn new(
        name: impl Into<String>,
        key: impl Into<String>,
        empty: Option<String>,
        mode: SelectionMode,
        all: bool,
    ) -> Self {
        let name = name.into();
        let accessor = Accessor::Property {
            key: key.into(),
            empty: empty.unwrap_or_default(),
        };
        let widget = OptionList::new(name.clone(), mode, all && mode == SelectionMode::And);
        Self {
            dimension: Dimension::new(name.clone(), accessor),
            name,
            mode,
            active: BTreeSet::new(),
            widget,
            events: Emitter::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn active(&self) -> &BTreeSet<String> {
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

    /// Replace the active label set wholesale. Empty clears the
    /// restriction. Radio filters reject multi-label sets.
    pub fn set_active(&mut self, labels: BTreeSet<String>) -> Result<()> {
        if self.mode == SelectionMode::And && labels.len() > 1 {
            return Err(AidmapError::InvalidSelection(format!(
                "{}: a radio filter takes at most one label, got {}",
                self.name,
                labels.len()
            )));
        }
        self.active = labels;
        self.apply();
        Ok(())
    }

    /// Flip one label's membership (a checkbox click). In radio mode
    /// this replaces the selection instead.
    pub fn toggle(&mut self, label: &str) {
        match self.mode {
            SelectionMode::And => {
                if self.active.contains(label) {
                    self.active.clear();
                } else {
                    self.active.clear();
                    self.active.insert(label.to_string());
                }
            }
            SelectionMode::Or => {
                if !self.active.remove(label) {
                    self.active.insert(label.to_string());
                }
            }
        }
        self.apply();
    }

    fn selection(&self) -> Selection {
        if self.active.is_empty() {
            Selection::All
        } else {
            Selection::Labels(self.active.clone())
        }
    }

    fn apply(&mut self) {
        if self.active.is_empty() {
            self.dimension.filter_all();
        } else {
            let labels = self.active.clone();
            let accessor = self.dimension.accessor().clone();
            self.dimension
                .filter(move |f| labels.contains(accessor.key_of(f).as_str()));
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

impl Filter for CategoryFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> &Dimension {
        &self.dimension
    }

    fn evaluate(&self, feature: &Feature) -> bool {
        self.active.is_empty() || self.active.contains(self.dimension.key_of(feature).as_str())
    }

    fn render(&mut self, groups: &[GroupCount]) {
        self.widget.render(groups);
    }

    fn reset(&mut self) {
        self.active.clear();
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
