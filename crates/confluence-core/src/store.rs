//! Network store: queryable view of the hydrography graph.
//!
//! The resolver and navigator depend on the narrow [`NetworkStore`]
//! capability interface, not on any particular backend. The in-memory
//! implementation wraps a petgraph `StableDiGraph` whose edges point in the
//! direction of flow (upstream node → downstream node) and is loadable from
//! a JSON network file.

use std::collections::HashMap;
use std::path::Path;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Catchment, Comid, DataSource, FlowDirection, FlowEdge, FlowPath};

/// Read-only query capabilities over the hydrography network.
pub trait NetworkStore: Send + Sync {
    /// Fetch a catchment by comid.
    fn catchment(&self, comid: Comid) -> Result<Option<Catchment>>;

    /// Cross-walk an external (source, identifier) pair to a comid.
    fn find_by_identifier(&self, source: &str, identifier: &str) -> Result<Option<Comid>>;

    /// Flow edges adjacent to a catchment in the given direction.
    fn neighbors(&self, comid: Comid, direction: FlowDirection) -> Result<Vec<FlowEdge>>;

    /// Total catchments in the network. Bounds traversal expansion.
    fn catchment_count(&self) -> usize;
}

/// One flow relationship in the network file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flowline {
    pub upstream: Comid,
    pub downstream: Comid,
    pub path: FlowPath,
}

/// One crosswalk entry linking an external identifier to a catchment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrosswalkEntry {
    pub source: String,
    pub identifier: String,
    pub comid: Comid,
}

/// On-disk JSON representation of a complete network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkFile {
    pub sources: Vec<DataSource>,
    pub catchments: Vec<Catchment>,
    pub flowlines: Vec<Flowline>,
    #[serde(default)]
    pub crosswalk: Vec<CrosswalkEntry>,
}

impl NetworkFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::StoreUnavailable(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::InconsistentNetwork(format!("{}: {e}", path.display())))
    }
}

/// In-memory hydrography network backed by a petgraph stable digraph.
pub struct InMemoryNetwork {
    graph: StableDiGraph<Catchment, FlowPath>,
    by_comid: HashMap<Comid, NodeIndex>,
    crosswalk: HashMap<(String, String), Comid>,
}

impl std::fmt::Debug for InMemoryNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryNetwork")
            .field("catchments", &self.graph.node_count())
            .field("flowlines", &self.graph.edge_count())
            .field("crosswalk_entries", &self.crosswalk.len())
            .finish()
    }
}

impl InMemoryNetwork {
    pub fn new() -> Self {
        InMemoryNetwork {
            graph: StableDiGraph::new(),
            by_comid: HashMap::new(),
            crosswalk: HashMap::new(),
        }
    }

    /// Build a network from a parsed network file. Duplicate catchments or
    /// dangling flowlines are data-integrity errors; duplicate crosswalk
    /// entries keep the first one loaded and log a warning.
    pub fn from_network_file(file: &NetworkFile) -> Result<Self> {
        let mut network = InMemoryNetwork::new();
        for catchment in &file.catchments {
            network.add_catchment(catchment.clone())?;
        }
        for flowline in &file.flowlines {
            network.add_flowline(flowline.upstream, flowline.downstream, flowline.path)?;
        }
        for entry in &file.crosswalk {
            network.add_crosswalk(entry.clone())?;
        }
        Ok(network)
    }

    /// Load and build from a JSON network file on disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file = NetworkFile::load(path)?;
        Self::from_network_file(&file)
    }

    pub fn add_catchment(&mut self, catchment: Catchment) -> Result<()> {
        let comid = catchment.comid;
        if self.by_comid.contains_key(&comid) {
            return Err(Error::InconsistentNetwork(format!(
                "duplicate catchment {comid}"
            )));
        }
        let idx = self.graph.add_node(catchment);
        self.by_comid.insert(comid, idx);
        Ok(())
    }

    /// Add a flow edge from `upstream` to `downstream`.
    pub fn add_flowline(
        &mut self,
        upstream: Comid,
        downstream: Comid,
        path: FlowPath,
    ) -> Result<()> {
        let from = self.index_of(upstream)?;
        let to = self.index_of(downstream)?;
        self.graph.add_edge(from, to, path);
        Ok(())
    }

    pub fn add_crosswalk(&mut self, entry: CrosswalkEntry) -> Result<()> {
        if !self.by_comid.contains_key(&entry.comid) {
            return Err(Error::InconsistentNetwork(format!(
                "crosswalk {}/{} points at unknown catchment {}",
                entry.source, entry.identifier, entry.comid
            )));
        }
        let key = (entry.source.clone(), entry.identifier.clone());
        if let Some(existing) = self.crosswalk.get(&key) {
            tracing::warn!(
                source = %entry.source,
                identifier = %entry.identifier,
                kept = %existing,
                dropped = %entry.comid,
                "duplicate crosswalk entry ignored"
            );
            return Ok(());
        }
        self.crosswalk.insert(key, entry.comid);
        Ok(())
    }

    /// Startup guard: flow edges must form a DAG.
    pub fn verify_acyclic(&self) -> Result<()> {
        if petgraph::algo::is_cyclic_directed(&self.graph) {
            return Err(Error::InconsistentNetwork(
                "flow graph contains a cycle".to_string(),
            ));
        }
        Ok(())
    }

    pub fn flowline_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn index_of(&self, comid: Comid) -> Result<NodeIndex> {
        self.by_comid.get(&comid).copied().ok_or_else(|| {
            Error::InconsistentNetwork(format!("flowline references unknown catchment {comid}"))
        })
    }
}

impl Default for InMemoryNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkStore for InMemoryNetwork {
    fn catchment(&self, comid: Comid) -> Result<Option<Catchment>> {
        Ok(self
            .by_comid
            .get(&comid)
            .and_then(|&idx| self.graph.node_weight(idx))
            .cloned())
    }

    fn find_by_identifier(&self, source: &str, identifier: &str) -> Result<Option<Comid>> {
        Ok(self
            .crosswalk
            .get(&(source.to_string(), identifier.to_string()))
            .copied())
    }

    fn neighbors(&self, comid: Comid, direction: FlowDirection) -> Result<Vec<FlowEdge>> {
        let Some(&idx) = self.by_comid.get(&comid) else {
            return Ok(Vec::new());
        };
        let petgraph_dir = match direction {
            FlowDirection::Upstream => Direction::Incoming,
            FlowDirection::Downstream => Direction::Outgoing,
        };
        let mut edges = Vec::new();
        for edge_ref in self.graph.edges_directed(idx, petgraph_dir) {
            let far = match direction {
                FlowDirection::Upstream => edge_ref.source(),
                FlowDirection::Downstream => edge_ref.target(),
            };
            let far_comid = self
                .graph
                .node_weight(far)
                .map(|c| c.comid)
                .ok_or_else(|| {
                    Error::InconsistentNetwork(format!("dangling flow edge at {comid}"))
                })?;
            edges.push(FlowEdge {
                comid: far_comid,
                path: *edge_ref.weight(),
            });
        }
        Ok(edges)
    }

    fn catchment_count(&self) -> usize {
        self.graph.node_count()
    }
}
