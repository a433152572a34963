//! Reads GeoJSON FeatureCollections into features and regions.
//!
//! This stands in for the external data pipeline: service points come
//! from a pre-compiled FeatureCollection, region boundaries from a
//! polygon FeatureCollection. Records the loader cannot use (missing
//! or non-point geometry for services, non-polygon geometry for
//! regions) are skipped, not fatal — partial data is normal here.

use crate::error::{AidmapError, Result};
use crate::filters::Region;
use crate::model::{Coordinate, Feature};
use geo::MultiPolygon;
use geojson::{FeatureCollection, GeoJson};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

fn read_collection(path: &Path) -> Result<FeatureCollection> {
    let file = File::open(path)?;
    let geojson = GeoJson::from_reader(BufReader::new(file))?;
    match geojson {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        _ => Err(AidmapError::Data(format!(
            "{} is not a FeatureCollection",
            path.display()
        ))),
    }
}

fn feature_id(feature: &geojson::Feature, index: usize, prefix: &str) -> String {
    match &feature.id {
        Some(geojson::feature::Id::String(s)) => s.clone(),
        Some(geojson::feature::Id::Number(n)) => n.to_string(),
        None => format!("{}-{}", prefix, index),
    }
}

/// Read service-point features. GeoJSON coordinates are (lng, lat).
pub fn read_features(path: &Path) -> Result<Vec<Feature>> {
    let collection = read_collection(path)?;
    let mut features = Vec::new();

    for (index, gj) in collection.features.into_iter().enumerate() {
        let location = match gj.geometry.as_ref().map(|g| &g.value) {
            Some(geojson::Value::Point(coords)) if coords.len() >= 2 => {
                Coordinate::new(coords[1], coords[0])
            }
            _ => {
                debug!(index, "skipping feature without a point geometry");
                continue;
            }
        };
        features.push(Feature {
            id: feature_id(&gj, index, "feature"),
            properties: gj.properties.unwrap_or_default(),
            location,
        });
    }

    debug!(count = features.len(), path = %path.display(), "features loaded");
    Ok(features)
}

/// Read region polygons. The display name comes from `name_property`
/// (e.g. `adm1_name`), falling back to the region id.
pub fn read_regions(path: &Path, name_property: &str) -> Result<Vec<Region>> {
    let collection = read_collection(path)?;
    let mut regions = Vec::new();

    for (index, gj) in collection.features.into_iter().enumerate() {
        let Some(geometry) = gj.geometry.as_ref() else {
            continue;
        };
        let geo_geometry: geo::Geometry<f64> = geometry.value.clone().try_into()?;
        let boundary = match geo_geometry {
            geo::Geometry::Polygon(p) => MultiPolygon::new(vec![p]),
            geo::Geometry::MultiPolygon(mp) => mp,
            _ => {
                debug!(index, "skipping region without a polygon geometry");
                continue;
            }
        };

        let id = feature_id(&gj, index, "region");
        let name = gj
            .properties
            .as_ref()
            .and_then(|p| p.get(name_property))
            .and_then(Value::as_str)
            .unwrap_or(id.as_str())
            .to_string();

        regions.push(Region { id, name, boundary });
    }

    debug!(count = regions.len(), path = %path.display(), "regions loaded");
    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const SERVICES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": "svc-1",
                "geometry": {"type": "Point", "coordinates": [35.5, 33.89]},
                "properties": {"activityName": "Food Distribution", "activityCategory": "FOOD"}
            },
            {
                "type": "Feature",
                "id": "svc-2",
                "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1]]},
                "properties": {"activityName": "Ignored"}
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [36.0, 34.0]},
                "properties": {}
            }
        ]
    }"#;

    const REGIONS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": "reg-1",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0, 0], [2, 0], [2, 2], [0, 2], [0, 0]]]
                },
                "properties": {"adm1_name": "North"}
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[5, 5], [6, 5], [6, 6], [5, 6], [5, 5]]]
                },
                "properties": {}
            }
        ]
    }"#;

    #[test]
    fn reads_point_features_and_skips_the_rest() {
        let file = write_temp(SERVICES);
        let features = read_features(file.path()).unwrap();

        assert_eq!(features.len(), 2);
        assert_eq!(features[0].id, "svc-1");
        // GeoJSON order is (lng, lat); ours is (lat, lng).
        assert_eq!(features[0].location, Coordinate::new(33.89, 35.5));
        assert_eq!(
            features[0].label("activityName"),
            Some("Food Distribution")
        );
        // The id-less point feature gets a positional id.
        assert_eq!(features[1].id, "feature-2");
    }

    #[test]
    fn reads_regions_with_configured_name_property() {
        let file = write_temp(REGIONS);
        let regions = read_regions(file.path(), "adm1_name").unwrap();

        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].id, "reg-1");
        assert_eq!(regions[0].name, "North");
        // Missing name property falls back to the id.
        assert_eq!(regions[1].id, "region-1");
        assert_eq!(regions[1].name, "region-1");
    }

    #[test]
    fn rejects_non_collections() {
        let file = write_temp(r#"{"type": "Point", "coordinates": [0, 0]}"#);
        assert!(matches!(
            read_features(file.path()).unwrap_err(),
            AidmapError::Data(_)
        ));
    }
}
