//! Core data structures for the hydrography network

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Canonical catchment identifier (NHD-style comid).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Comid(pub i64);

impl fmt::Display for Comid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// GeoJSON-shaped geometry carried by a catchment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
}

/// A single node in the hydrography network: one drainage unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catchment {
    pub comid: Comid,
    pub geometry: Geometry,
    /// Length of the reach flowing through this catchment, in kilometers.
    /// Traversal distance accumulates over this field.
    pub reach_length_km: f64,
    /// Contributing drainage area in square kilometers. At an upstream
    /// junction the edge toward the largest drainage is the mainstem.
    pub drainage_sqkm: f64,
}

/// Whether a downstream edge carries the main flow or a diversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowPath {
    Main,
    Diversion,
}

/// Traversal direction relative to flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowDirection {
    Upstream,
    Downstream,
}

/// An edge adjacent to a catchment, as reported by the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowEdge {
    /// The neighboring catchment on the far side of the edge.
    pub comid: Comid,
    pub path: FlowPath,
}

/// An external identifier namespace cross-walked to catchments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    /// Registry token, e.g. `wqp`. Unique within the registry.
    #[serde(rename = "source")]
    pub id: String,
    #[serde(rename = "sourceName")]
    pub name: String,
}

/// A (source, identifier) pair from a request. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureIdentifier {
    pub source: String,
    pub identifier: String,
}

/// The four fixed traversal styles over the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationMode {
    UpstreamMain,
    UpstreamTributaries,
    DownstreamMain,
    DownstreamDiversions,
}

impl NavigationMode {
    pub const ALL: [NavigationMode; 4] = [
        NavigationMode::UpstreamMain,
        NavigationMode::UpstreamTributaries,
        NavigationMode::DownstreamMain,
        NavigationMode::DownstreamDiversions,
    ];

    /// Wire token used in navigation URLs.
    pub fn token(&self) -> &'static str {
        match self {
            NavigationMode::UpstreamMain => "UM",
            NavigationMode::UpstreamTributaries => "UT",
            NavigationMode::DownstreamMain => "DM",
            NavigationMode::DownstreamDiversions => "DD",
        }
    }

    /// Key used in the navigation-options response object.
    pub fn descriptor(&self) -> &'static str {
        match self {
            NavigationMode::UpstreamMain => "upstreamMain",
            NavigationMode::UpstreamTributaries => "upstreamTributaries",
            NavigationMode::DownstreamMain => "downstreamMain",
            NavigationMode::DownstreamDiversions => "downstreamDiversions",
        }
    }

    /// Which way this mode walks the flow edges.
    pub fn direction(&self) -> FlowDirection {
        match self {
            NavigationMode::UpstreamMain | NavigationMode::UpstreamTributaries => {
                FlowDirection::Upstream
            }
            NavigationMode::DownstreamMain | NavigationMode::DownstreamDiversions => {
                FlowDirection::Downstream
            }
        }
    }
}

impl FromStr for NavigationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UM" => Ok(NavigationMode::UpstreamMain),
            "UT" => Ok(NavigationMode::UpstreamTributaries),
            "DM" => Ok(NavigationMode::DownstreamMain),
            "DD" => Ok(NavigationMode::DownstreamDiversions),
            other => Err(Error::UnknownNavigationMode(other.to_string())),
        }
    }
}

impl fmt::Display for NavigationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
