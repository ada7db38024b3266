//! Integration tests for Confluence
//!
//! These drive the full stack — registry, store, resolver, navigator, and
//! response assembly — through the axum router, the way a deployment
//! serves real lookup traffic.

use std::sync::Arc;

use axum::body::to_bytes;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use confluence_core::{
    geojson, Catchment, Comid, CrosswalkEntry, DataSource, DataSourceRegistry, FlowPath, Flowline,
    Geometry, InMemoryNetwork, NetworkFile,
};
use confluence_server::{router::create_router, AppState, NavigationLimits};

fn catchment(comid: i64, reach_length_km: f64, drainage_sqkm: f64) -> Catchment {
    Catchment {
        comid: Comid(comid),
        geometry: Geometry::Point {
            coordinates: [-89.38, 43.08],
        },
        reach_length_km,
        drainage_sqkm,
    }
}

fn flowline(upstream: i64, downstream: i64, path: FlowPath) -> Flowline {
    Flowline {
        upstream: Comid(upstream),
        downstream: Comid(downstream),
        path,
    }
}

/// Junction above the station catchment, diversion diamond below it.
fn test_network_file() -> NetworkFile {
    NetworkFile {
        sources: vec![
            DataSource {
                id: "wqp".to_string(),
                name: "Water Quality Portal".to_string(),
            },
            DataSource {
                id: "huc12pp".to_string(),
                name: "HUC12 Pour Points".to_string(),
            },
        ],
        catchments: vec![
            catchment(13297194, 1.5, 120.0),
            catchment(13297198, 1.5, 85.0),
            catchment(13297228, 2.0, 210.0),
            catchment(13297246, 1.2, 540.0),
            catchment(13297254, 0.8, 560.0),
            catchment(13297262, 2.4, 15.0),
            catchment(13297274, 3.1, 600.0),
        ],
        flowlines: vec![
            flowline(13297194, 13297228, FlowPath::Main),
            flowline(13297198, 13297228, FlowPath::Main),
            flowline(13297228, 13297246, FlowPath::Main),
            flowline(13297246, 13297254, FlowPath::Main),
            flowline(13297246, 13297262, FlowPath::Diversion),
            flowline(13297254, 13297274, FlowPath::Main),
            flowline(13297262, 13297274, FlowPath::Main),
        ],
        crosswalk: vec![
            CrosswalkEntry {
                source: "wqp".to_string(),
                identifier: "USGS-05427880".to_string(),
                comid: Comid(13297246),
            },
            CrosswalkEntry {
                source: "huc12pp".to_string(),
                identifier: "070900020604".to_string(),
                comid: Comid(13297228),
            },
        ],
    }
}

fn test_router() -> axum::Router {
    let file = test_network_file();
    let registry = DataSourceRegistry::new(file.sources.clone()).unwrap();
    let store = InMemoryNetwork::from_network_file(&file).unwrap();
    store.verify_acyclic().unwrap();
    let state = AppState::new(registry, Arc::new(store), NavigationLimits::default());
    create_router(Arc::new(state))
}

async fn get(uri: &str) -> (StatusCode, Option<String>, serde_json::Value) {
    let response = test_router()
        .oneshot(Request::get(uri).body(axum::body::Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, content_type, body)
}

#[tokio::test]
async fn data_sources_are_listed_once_as_json() {
    let (status, content_type, body) = get("/api").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("application/json"));

    let sources = body.as_array().unwrap();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0]["source"], "wqp");
    assert_eq!(sources[0]["sourceName"], "Water Quality Portal");
    assert_eq!(sources[1]["source"], "huc12pp");
}

#[tokio::test]
async fn feature_type_listing_is_a_bad_request() {
    let (status, _content_type, body) = get("/api/comid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "This functionality is not implemented.");
}

#[tokio::test]
async fn comid_lookup_returns_a_geojson_feature() {
    let (status, content_type, body) = get("/api/comid/13297246").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some(geojson::MIME_TYPE_GEOJSON));
    assert_eq!(body["type"], "Feature");
    assert_eq!(body["properties"]["comid"], 13297246);
}

#[tokio::test]
async fn wqp_station_resolves_after_linking() {
    let (status, content_type, body) = get("/api/wqp/USGS-05427880").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some(geojson::MIME_TYPE_GEOJSON));
    assert_eq!(body["properties"]["comid"], 13297246);
    assert_eq!(body["properties"]["identifier"], "USGS-05427880");
}

#[tokio::test]
async fn huc12_pour_point_resolves_after_linking() {
    let (status, _content_type, body) = get("/api/huc12pp/070900020604").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["properties"]["comid"], 13297228);
}

#[tokio::test]
async fn navigation_options_enumerate_the_modes() {
    let (status, content_type, body) = get("/api/wqp/USGS-05427880/navigate").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("application/json"));

    let modes = body.as_object().unwrap();
    assert_eq!(modes.len(), 4);
    assert_eq!(modes["upstreamMain"], "/api/wqp/USGS-05427880/navigate/UM");
}

#[tokio::test]
async fn unknown_source_and_unknown_identifier_both_404() {
    // Unregistered source token.
    let (status, content_type, body) = get("/api/wqx/USGS-05427880/navigate").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(content_type.unwrap().starts_with("application/json"));
    assert!(body["message"].as_str().unwrap().contains("wqx"));

    // Registered source, nonexistent identifier.
    let (status, content_type, body) = get("/api/wqp/USGX-05427880/navigate").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(content_type.unwrap().starts_with("application/json"));
    assert!(body["message"].as_str().unwrap().contains("USGX-05427880"));
}

#[tokio::test]
async fn downstream_main_navigation_is_ordered_by_distance() {
    let (status, content_type, body) = get("/api/comid/13297246/navigate/DM").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some(geojson::MIME_TYPE_GEOJSON));
    assert_eq!(body["type"], "FeatureCollection");

    let comids: Vec<i64> = body["features"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["properties"]["comid"].as_i64().unwrap())
        .collect();
    assert_eq!(comids, vec![13297254, 13297274]);
}

#[tokio::test]
async fn upstream_navigation_from_a_linked_station() {
    let (status, _content_type, body) = get("/api/wqp/USGS-05427880/navigate/UT").await;
    assert_eq!(status, StatusCode::OK);
    let comids: Vec<i64> = body["features"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["properties"]["comid"].as_i64().unwrap())
        .collect();
    assert_eq!(comids, vec![13297228, 13297194, 13297198]);
}

#[tokio::test]
async fn unknown_navigation_mode_is_a_bad_request() {
    let (status, _content_type, body) = get("/api/comid/13297246/navigate/XX").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("XX"));
}
