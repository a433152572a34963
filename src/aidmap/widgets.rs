//! Pure data models for the filter widgets.
//!
//! A widget here is the state an interactive renderer needs: which
//! options exist, their labels and live counts, and which are selected
//! or disabled. Rendering them to a screen is a collaborator's job.
//!
//! The central contract is [`OptionList::render`]: it refreshes labels
//! and counts in place and appends options it has not seen, but it
//! never reorders, removes, or reselects anything — so a data update
//! arriving mid-interaction cannot disturb what the user is doing.

use crate::composite::GroupCount;
use crate::filters::SelectionMode;

/// Synthetic first entry of radio lists: selecting it clears the
/// restriction.
pub const ALL_KEY: &str = "All";

pub const LOCATION_ALL: &str = "all";
pub const LOCATION_USER: &str = "user";
pub const LOCATION_PICKED: &str = "picked";

#[derive(Debug, Clone, PartialEq)]
pub struct OptionEntry {
    /// Identity of the option; stable for the widget's lifetime.
    pub key: String,
    pub label: String,
    /// Payload carried by the option (e.g. a `"lat,lng"` string for
    /// location choices). Most options need none.
    pub value: Option<String>,
    /// Live cross-filtered count, for lists that show counts.
    pub count: Option<usize>,
    pub selected: bool,
    pub enabled: bool,
}

impl OptionEntry {
    fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            value: None,
            count: None,
            selected: false,
            enabled: true,
        }
    }
}

/// A checkbox or radio option list.
#[derive(Debug, Clone)]
pub struct OptionList {
    name: String,
    mode: SelectionMode,
    all: bool,
    entries: Vec<OptionEntry>,
}

impl OptionList {
    pub fn new(name: impl Into<String>, mode: SelectionMode, all: bool) -> Self {
        Self {
            name: name.into(),
            mode,
            all,
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn entries(&self) -> &[OptionEntry] {
        &self.entries
    }

    pub fn entry(&self, key: &str) -> Option<&OptionEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn entry_mut(&mut self, key: &str) -> Option<&mut OptionEntry> {
        self.entries.iter_mut().find(|e| e.key == key)
    }

    /// The entry for `key`, appending a fresh one if absent. Existing
    /// entries keep their position and state.
    pub fn ensure_entry(&mut self, key: &str, label: &str) -> &mut OptionEntry {
        if let Some(i) = self.entries.iter().position(|e| e.key == key) {
            return &mut self.entries[i];
        }
        self.entries.push(OptionEntry::new(key, label));
        self.entries.last_mut().expect("just pushed")
    }

    /// Refresh the list from cross-filtered group counts.
    ///
    /// Idempotent: existing entries only have label and count updated;
    /// selection, enablement, and position are preserved; unseen keys
    /// are appended; nothing is ever removed.
    pub fn render(&mut self, groups: &[GroupCount]) {
        if groups.is_empty() && self.entries.is_empty() {
            return;
        }
        if self.all && self.entry(ALL_KEY).is_none() {
            let mut entry = OptionEntry::new(ALL_KEY, ALL_KEY);
            // The initial nothing-selected state shows "All" checked.
            entry.selected = true;
            self.entries.insert(0, entry);
        }
        if self.all {
            let total: usize = groups.iter().map(|g| g.count).sum();
            if let Some(entry) = self.entry_mut(ALL_KEY) {
                entry.count = Some(total);
            }
        }
        // Keys that fell out of the cross-filtered view show a zero
        // count rather than a stale one.
        for entry in &mut self.entries {
            if entry.key != ALL_KEY && entry.count.is_some() {
                entry.count = Some(0);
            }
        }
        for group in groups {
            let entry = self.ensure_entry(&group.key, &group.key);
            entry.label = group.key.clone();
            entry.count = Some(group.count);
        }
    }

    /// Keys currently selected, the synthetic "All" excluded.
    pub fn selected_keys(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.selected && e.key != ALL_KEY)
            .map(|e| e.key.as_str())
            .collect()
    }

    /// Mirror a controller's active set into the checkboxes/radios.
    /// An empty set is the nothing-selected state.
    pub fn set_selected_keys<'a, I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = &'a str> + Clone,
    {
        let mut any = false;
        for entry in &mut self.entries {
            entry.selected = keys.clone().into_iter().any(|k| k == entry.key);
            any |= entry.selected;
        }
        // "All" is on exactly when nothing else is.
        if !any {
            if let Some(entry) = self.entry_mut(ALL_KEY) {
                entry.selected = true;
            }
        }
    }

    pub fn select_only(&mut self, key: &str) {
        for entry in &mut self.entries {
            entry.selected = entry.key == key;
        }
    }

    /// Back to the nothing-selected state ("All" checked where present).
    pub fn clear_selection(&mut self) {
        for entry in &mut self.entries {
            entry.selected = false;
        }
        if let Some(entry) = self.entry_mut(ALL_KEY) {
            entry.selected = true;
        }
    }
}

fn distance_key(km: f64) -> String {
    if km.fract() == 0.0 {
        format!("{}", km as i64)
    } else {
        format!("{}", km)
    }
}

/// The proximity control: a location fieldset and a distance fieldset,
/// both radio lists.
#[derive(Debug, Clone)]
pub struct ProximityControl {
    pub locations: OptionList,
    pub distances: OptionList,
}

impl ProximityControl {
    pub fn new(distance_steps: &[f64]) -> Self {
        let mut locations = OptionList::new("location", SelectionMode::And, false);
        locations.ensure_entry(LOCATION_ALL, "All").selected = true;
        // Not selectable until the external user location is valid.
        locations.ensure_entry(LOCATION_USER, "Near you").enabled = false;
        locations.ensure_entry(LOCATION_PICKED, "Near a selected location");

        let mut distances = OptionList::new("distance", SelectionMode::And, false);
        for (i, km) in distance_steps.iter().enumerate() {
            let key = distance_key(*km);
            let entry = distances.ensure_entry(&key, &format!("{} Km", key));
            entry.selected = i == 0;
        }

        Self {
            locations,
            distances,
        }
    }

    /// Refresh the near-you entry in place once the user location is
    /// valid: same entry, new value, now selectable. The rest of the
    /// control is untouched.
    pub fn enable_user_entry(&mut self, location: &str) {
        if let Some(entry) = self.locations.entry_mut(LOCATION_USER) {
            entry.enabled = true;
            entry.value = Some(location.to_string());
        }
    }

    /// Record the map-picked coordinate on its entry.
    pub fn set_picked_value(&mut self, location: &str) {
        if let Some(entry) = self.locations.entry_mut(LOCATION_PICKED) {
            entry.value = Some(location.to_string());
        }
    }

    pub fn select_location(&mut self, key: &str) {
        self.locations.select_only(key);
    }

    pub fn select_distance(&mut self, km: f64) {
        let key = distance_key(km);
        // A radius outside the configured steps still deselects the
        // steps; the steps are hints, not a whitelist.
        self.distances.select_only(&key);
    }

    pub fn reset(&mut self) {
        self.locations.select_only(LOCATION_ALL);
        if let Some(first) = self.distances.entries().first().map(|e| e.key.clone()) {
            self.distances.select_only(&first);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, usize)]) -> Vec<GroupCount> {
        pairs
            .iter()
            .map(|(key, count)| GroupCount {
                key: key.to_string(),
                count: *count,
            })
            .collect()
    }

    #[test]
    fn render_appends_new_keys_without_disturbing_existing_entries() {
        let mut list = OptionList::new("activityName", SelectionMode::Or, false);
        list.render(&counts(&[("FOOD", 2), ("WASH", 1)]));
        list.entry_mut("FOOD").unwrap().selected = true;

        list.render(&counts(&[("FOOD", 1), ("HEALTH", 3), ("WASH", 1)]));

        let keys: Vec<&str> = list.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["FOOD", "WASH", "HEALTH"]);
        assert!(list.entry("FOOD").unwrap().selected);
        assert_eq!(list.entry("FOOD").unwrap().count, Some(1));
        assert_eq!(list.entry("HEALTH").unwrap().count, Some(3));
    }

    #[test]
    fn render_is_idempotent() {
        let mut list = OptionList::new("activityName", SelectionMode::Or, false);
        let groups = counts(&[("FOOD", 2), ("WASH", 1)]);

        list.render(&groups);
        list.entry_mut("WASH").unwrap().selected = true;
        let snapshot = list.entries().to_vec();

        list.render(&groups);
        assert_eq!(list.entries(), snapshot.as_slice());
    }

    #[test]
    fn radio_lists_get_a_summed_all_entry() {
        let mut list = OptionList::new("activityName", SelectionMode::And, true);
        list.render(&counts(&[("FOOD", 2), ("WASH", 3)]));

        let all = list.entry(ALL_KEY).unwrap();
        assert_eq!(all.count, Some(5));
        assert!(all.selected);
        assert_eq!(list.entries()[0].key, ALL_KEY);
    }

    #[test]
    fn selection_mirror_toggles_the_all_entry() {
        let mut list = OptionList::new("activityName", SelectionMode::And, true);
        list.render(&counts(&[("FOOD", 2), ("WASH", 3)]));

        list.set_selected_keys(["FOOD"]);
        assert!(!list.entry(ALL_KEY).unwrap().selected);
        assert_eq!(list.selected_keys(), vec!["FOOD"]);

        list.set_selected_keys([]);
        assert!(list.entry(ALL_KEY).unwrap().selected);
        assert!(list.selected_keys().is_empty());
    }

    #[test]
    fn user_location_entry_is_enabled_in_place() {
        let mut control = ProximityControl::new(&[5.0, 10.0, 30.0, 50.0]);

        let before: Vec<String> = control
            .locations
            .entries()
            .iter()
            .map(|e| e.key.clone())
            .collect();
        assert!(!control.locations.entry(LOCATION_USER).unwrap().enabled);

        control.enable_user_entry("33.89,35.5");

        let after: Vec<String> = control
            .locations
            .entries()
            .iter()
            .map(|e| e.key.clone())
            .collect();
        assert_eq!(before, after);

        let user = control.locations.entry(LOCATION_USER).unwrap();
        assert!(user.enabled);
        assert_eq!(user.value.as_deref(), Some("33.89,35.5"));
    }

    #[test]
    fn control_defaults_select_all_and_the_first_distance() {
        let control = ProximityControl::new(&[5.0, 10.0]);
        assert!(control.locations.entry(LOCATION_ALL).unwrap().selected);
        assert!(control.distances.entry("5").unwrap().selected);
        assert!(!control.distances.entry("10").unwrap().selected);
    }
}
