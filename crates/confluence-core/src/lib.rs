//! Confluence Core — hydrography network model, identifier resolution,
//! and navigation

pub mod error;
pub mod geojson;
pub mod model;
pub mod navigator;
pub mod registry;
pub mod resolver;
pub mod store;


#[cfg(test)]
pub mod test_utils;

pub use error::{Error, Result};
pub use model::{
    Catchment, Comid, DataSource, FeatureIdentifier, FlowDirection, FlowEdge, FlowPath, Geometry,
    NavigationMode,
};
pub use navigator::navigate;
pub use registry::{DataSourceRegistry, RegistryError};
pub use resolver::{resolve, resolve_feature_type, ResolvedFeature, COMID_NAMESPACE};
pub use store::{CrosswalkEntry, Flowline, InMemoryNetwork, NetworkFile, NetworkStore};
