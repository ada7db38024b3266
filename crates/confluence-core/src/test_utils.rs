//! Test fixtures: a small Yahara-style network with a junction, a
//! diversion diamond, and crosswalk entries for two sources.
//!
//! Layout (flow runs top to bottom; `=` marks the diversion):
//!
//! ```text
//!   13297194   13297198
//!        \       /
//!        13297228          <- huc12pp 070900020604
//!           |
//!        13297246          <- wqp USGS-05427880
//!         /     =
//!   13297254   13297262
//!         \     =
//!        13297274
//! ```

use crate::model::{Catchment, Comid, DataSource, FlowPath, Geometry};
use crate::registry::DataSourceRegistry;
use crate::store::{CrosswalkEntry, Flowline, InMemoryNetwork, NetworkFile};

pub const WQP_STATION: &str = "USGS-05427880";
pub const HUC12_POUR_POINT: &str = "070900020604";

pub fn fixture_sources() -> Vec<DataSource> {
    vec![
        DataSource {
            id: "wqp".to_string(),
            name: "Water Quality Portal".to_string(),
        },
        DataSource {
            id: "huc12pp".to_string(),
            name: "HUC12 Pour Points".to_string(),
        },
    ]
}

pub fn fixture_registry() -> DataSourceRegistry {
    DataSourceRegistry::new(fixture_sources()).unwrap()
}

fn point(lon: f64, lat: f64) -> Geometry {
    Geometry::Point {
        coordinates: [lon, lat],
    }
}

fn catchment(comid: i64, reach_length_km: f64, drainage_sqkm: f64) -> Catchment {
    Catchment {
        comid: Comid(comid),
        geometry: point(-89.38, 43.08),
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

pub fn fixture_network_file() -> NetworkFile {
    let mut catchments = vec![
        catchment(13297194, 1.5, 120.0),
        catchment(13297198, 1.5, 85.0),
        catchment(13297228, 2.0, 210.0),
        catchment(13297254, 0.8, 560.0),
        catchment(13297262, 2.4, 15.0),
        catchment(13297274, 3.1, 600.0),
    ];
    // The station catchment carries a polygon so both geometry variants
    // are exercised.
    catchments.push(Catchment {
        comid: Comid(13297246),
        geometry: Geometry::Polygon {
            coordinates: vec![vec![
                [-89.40, 43.07],
                [-89.36, 43.07],
                [-89.36, 43.10],
                [-89.40, 43.10],
                [-89.40, 43.07],
            ]],
        },
        reach_length_km: 1.2,
        drainage_sqkm: 540.0,
    });

    NetworkFile {
        sources: fixture_sources(),
        catchments,
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
                identifier: WQP_STATION.to_string(),
                comid: Comid(13297246),
            },
            CrosswalkEntry {
                source: "huc12pp".to_string(),
                identifier: HUC12_POUR_POINT.to_string(),
                comid: Comid(13297228),
            },
        ],
    }
}

pub fn fixture_network() -> InMemoryNetwork {
    InMemoryNetwork::from_network_file(&fixture_network_file()).unwrap()
}

/// A two-node flow loop for cycle handling tests.
pub fn cyclic_network() -> InMemoryNetwork {
    let mut network = InMemoryNetwork::new();
    network.add_catchment(catchment(100, 1.0, 10.0)).unwrap();
    network.add_catchment(catchment(200, 1.0, 10.0)).unwrap();
    network
        .add_flowline(Comid(100), Comid(200), FlowPath::Main)
        .unwrap();
    network
        .add_flowline(Comid(200), Comid(100), FlowPath::Main)
        .unwrap();
    network
}
