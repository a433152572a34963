use crate::error::{AidmapError, Result};
use crate::events::{Emitter, FilterEvent, SubscriptionId};
use crate::model::Coordinate;

/// The user's current position, as supplied by an external provider —
/// a GPS fix or a manual map pick. Invalid (unset) until the first
/// successful `set`; the proximity filter treats an invalid location
/// as "no restriction".
#[derive(Default)]
pub struct UserLocation {
    coordinate: Option<Coordinate>,
    events: Emitter,
}

impl UserLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.coordinate.is_some()
    }

    pub fn get(&self) -> Option<Coordinate> {
        self.coordinate
    }

    /// `"lat,lng"`, or the empty string while unset.
    pub fn location_string(&self) -> String {
        match self.coordinate {
            Some(coordinate) => coordinate.to_string(),
            None => String::new(),
        }
    }

    /// Update the position and notify listeners. Out-of-range
    /// coordinates are rejected and leave the previous state intact.
    pub fn set(&mut self, coordinate: Coordinate) -> Result<()> {
        if !coordinate.is_valid() {
            return Err(AidmapError::InvalidCoordinate(coordinate.to_string()));
        }
        self.coordinate = Some(coordinate);
        self.events.notify(&FilterEvent::LocationChanged {
            location: coordinate,
        });
        Ok(())
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&FilterEvent) + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(listener)
    }
}
