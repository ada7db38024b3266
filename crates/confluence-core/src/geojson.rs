//! Response assembly: catchments and navigation results as GeoJSON, plus
//! the navigation-options descriptor. Pure functions of their input.

use serde_json::{json, Value};

use crate::model::{Catchment, NavigationMode};
use crate::resolver::ResolvedFeature;

/// Content type for single features and feature collections.
pub const MIME_TYPE_GEOJSON: &str = "application/vnd.geo+json";

/// A resolved feature as a GeoJSON Feature.
pub fn feature(resolved: &ResolvedFeature) -> Value {
    json!({
        "type": "Feature",
        "geometry": resolved.catchment.geometry,
        "properties": {
            "comid": resolved.catchment.comid,
            "source": resolved.source,
            "sourceName": resolved.source_name,
            "identifier": resolved.identifier,
        },
    })
}

/// A navigation result as a GeoJSON FeatureCollection, preserving the
/// traversal order of `catchments`.
pub fn feature_collection(catchments: &[Catchment]) -> Value {
    let features: Vec<Value> = catchments
        .iter()
        .map(|c| {
            json!({
                "type": "Feature",
                "geometry": c.geometry,
                "properties": { "comid": c.comid },
            })
        })
        .collect();
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// The navigation-options object for a resolved feature: each mode mapped
/// to its relative navigation URL.
pub fn navigation_options(source: &str, identifier: &str) -> Value {
    let mut object = serde_json::Map::new();
    for mode in NavigationMode::ALL {
        object.insert(
            mode.descriptor().to_string(),
            json!(format!(
                "/api/{source}/{identifier}/navigate/{}",
                mode.token()
            )),
        );
    }
    Value::Object(object)
}
