//! The filter controllers.
//!
//! Each controller owns one [`Dimension`](crate::dimension::Dimension)
//! and one widget model, translates interaction calls into predicate
//! updates, and notifies its subscribers. The three variants share the
//! [`Filter`] interface and are selected at construction — behavior
//! never changes at runtime.

pub mod category;
pub mod proximity;
pub mod region;

pub use category::CategoryFilter;
pub use proximity::{LocationChoice, ProximityFilter};
pub use region::{Region, RegionFilter, RegionId, VisualState};

use crate::composite::GroupCount;
use crate::dimension::Dimension;
use crate::error::{AidmapError, Result};
use crate::model::Feature;

/// How a filter combines selections: `And` is the radio (single
/// choice) style, `Or` the checkbox (any of the chosen) style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    And,
    Or,
}

impl SelectionMode {
    /// Parse the strings used in filter configuration. Anything other
    /// than `"radio"` or `"checkbox"` is a configuration error.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "radio" => Ok(SelectionMode::And),
            "checkbox" => Ok(SelectionMode::Or),
            other => Err(AidmapError::InvalidMode(other.to_string())),
        }
    }
}

/// Common surface of the filter controllers.
pub trait Filter {
    fn name(&self) -> &str;

    fn dimension(&self) -> &Dimension;

    /// Apply this filter's current state to a single feature. A filter
    /// with no active selection passes everything.
    fn evaluate(&self, feature: &Feature) -> bool;

    /// Refresh this filter's widget from cross-filtered group counts.
    /// Idempotent; never disturbs selection state.
    fn render(&mut self, groups: &[GroupCount]);

    /// Back to the nothing-selected state.
    fn reset(&mut self);
}
