use chrono::NaiveDate;
use geo::{HaversineDistance, Point};
use serde_json::{Map, Value};

/// Stable identifier of a feature, normalized to a string at load time.
pub type FeatureId = String;

/// A geographic coordinate, latitude and longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both components are inside the valid degree ranges.
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Parse a `"lat,lng"` pair, the wire shape used for locations.
    pub fn parse(s: &str) -> Option<Self> {
        let (lat, lng) = s.split_once(',')?;
        let coord = Self::new(lat.trim().parse().ok()?, lng.trim().parse().ok()?);
        coord.is_valid().then_some(coord)
    }

    /// Great-circle (haversine) distance to another coordinate, in km.
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        let from = Point::new(self.lng, self.lat);
        let to = Point::new(other.lng, other.lat);
        from.haversine_distance(&to) / 1000.0
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// One record of the dataset: a service location with its point
/// geometry and property mapping.
///
/// Features are immutable after load and never deleted within a
/// session. Properties hold scalars, or nested maps in the
/// booleans-keyed-by-label pattern the source data uses for
/// multi-valued fields (e.g. office hours).
#[derive(Debug, Clone)]
pub struct Feature {
    pub id: FeatureId,
    pub properties: Map<String, Value>,
    pub location: Coordinate,
}

impl Feature {
    pub fn new(id: impl Into<FeatureId>, location: Coordinate) -> Self {
        Self {
            id: id.into(),
            properties: Map::new(),
            location,
        }
    }

    /// Builder-style property attachment, mainly for tests and fixtures.
    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// A string-valued property, if present and a string.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    /// The labels set to `true` inside a booleans-keyed-by-label
    /// property. Missing or non-map properties yield an empty list.
    pub fn flags(&self, key: &str) -> Vec<&str> {
        match self.properties.get(key).and_then(Value::as_object) {
            Some(map) => map
                .iter()
                .filter(|(_, v)| v.as_bool() == Some(true))
                .map(|(k, _)| k.as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    /// First flagged label of a booleans-keyed-by-label property.
    pub fn first_flag(&self, key: &str) -> Option<&str> {
        self.flags(key).into_iter().next()
    }

    /// An ISO `YYYY-MM-DD` date property (e.g. `startDate`).
    pub fn date(&self, key: &str) -> Option<NaiveDate> {
        self.label(key)
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }
}
