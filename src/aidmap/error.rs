use thiserror::Error;

/// Errors for aidmap.
///
/// Configuration problems (`InvalidMode`, `InvalidDistance`,
/// `InvalidCoordinate`, `MissingOption`) surface at construction or
/// setter time and are not recoverable at runtime. A feature missing a
/// filtered property is NOT an error: the dimension substitutes its
/// configured empty value and carries on.
#[derive(Error, Debug)]
pub enum AidmapError {
    #[error("Invalid filter mode: {0} (expected \"radio\" or \"checkbox\")")]
    InvalidMode(String),

    #[error("Invalid distance: {0} km")]
    InvalidDistance(f64),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Missing option: {0}")]
    MissingOption(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}

pub type Result<T> = std::result::Result<T, AidmapError>;
