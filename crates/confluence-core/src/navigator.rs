//! Network traversal: distance-ordered expansion from an origin catchment.
//!
//! Each traversal runs Pending → Expanding → Done: the frontier repeatedly
//! yields the nearest unfinalized catchment by cumulative reach length and
//! enqueues its qualifying neighbors for the mode, until the frontier
//! drains or the distance cap is passed. The frontier is keyed
//! `(distance, comid)` so equal distances pop in ascending comid order.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use ordered_float::OrderedFloat;

use crate::error::{Error, Result};
use crate::model::{Catchment, Comid, FlowEdge, FlowPath, NavigationMode};
use crate::store::NetworkStore;

/// Walk the network from `origin` in the given mode.
///
/// Returns catchments ordered by cumulative distance ascending, excluding
/// the origin itself. An origin with no qualifying neighbors yields an
/// empty result. `max_distance_km = None` means unbounded.
pub fn navigate(
    store: &dyn NetworkStore,
    origin: Comid,
    mode: NavigationMode,
    max_distance_km: Option<f64>,
) -> Result<Vec<Catchment>> {
    let mut traversal = Traversal {
        store,
        origin,
        mode,
        frontier: BinaryHeap::new(),
        best: HashMap::new(),
        discovered: HashMap::new(),
        finalized: HashSet::new(),
    };
    traversal.expand(origin, 0.0)?;

    let mut result = Vec::new();
    while let Some(Reverse((OrderedFloat(distance), comid))) = traversal.frontier.pop() {
        if traversal.finalized.contains(&comid) {
            // Stale frontier entry superseded by a shorter route.
            continue;
        }
        if let Some(cap) = max_distance_km {
            // The frontier is distance-ordered, so everything behind this
            // entry is at least as far out.
            if distance > cap {
                break;
            }
        }
        traversal.finalized.insert(comid);
        let catchment = traversal.discovered.remove(&comid).ok_or_else(|| {
            Error::InconsistentNetwork(format!("frontier entry {comid} lost its catchment"))
        })?;
        traversal.expand(comid, distance)?;
        result.push(catchment);
    }

    tracing::debug!(%origin, %mode, count = result.len(), "navigation complete");
    Ok(result)
}

/// One in-flight expansion. Discarded when the traversal completes.
struct Traversal<'a> {
    store: &'a dyn NetworkStore,
    origin: Comid,
    mode: NavigationMode,
    frontier: BinaryHeap<Reverse<(OrderedFloat<f64>, Comid)>>,
    /// Best known cumulative distance per discovered catchment.
    best: HashMap<Comid, f64>,
    /// Catchments fetched on discovery, awaiting finalization.
    discovered: HashMap<Comid, Catchment>,
    finalized: HashSet<Comid>,
}

impl Traversal<'_> {
    /// Enqueue the qualifying neighbors of `current` at cumulative `distance`.
    fn expand(&mut self, current: Comid, distance: f64) -> Result<()> {
        for neighbor in self.qualifying_neighbors(current)? {
            if neighbor == self.origin {
                return Err(Error::InconsistentNetwork(format!(
                    "flow from {current} cycles back to origin {}",
                    self.origin
                )));
            }
            if self.finalized.contains(&neighbor) {
                if self.mode.is_path() {
                    // A single-edge path can only re-reach a finalized
                    // catchment through a cycle.
                    return Err(Error::InconsistentNetwork(format!(
                        "flow from {current} revisits {neighbor}"
                    )));
                }
                // Tree expansion may legally reconverge over a diversion
                // diamond; the finalized route was already the nearest.
                continue;
            }
            let catchment = match self.discovered.get(&neighbor) {
                Some(c) => c.clone(),
                None => self.store.catchment(neighbor)?.ok_or_else(|| {
                    Error::InconsistentNetwork(format!(
                        "flow edge at {current} references missing catchment {neighbor}"
                    ))
                })?,
            };
            let neighbor_distance = distance + catchment.reach_length_km;
            let improved = self
                .best
                .get(&neighbor)
                .is_none_or(|&d| neighbor_distance < d);
            if improved {
                self.best.insert(neighbor, neighbor_distance);
                self.discovered.insert(neighbor, catchment);
                self.frontier
                    .push(Reverse((OrderedFloat(neighbor_distance), neighbor)));
            }
        }
        Ok(())
    }

    /// The neighbors the mode actually follows out of `comid`.
    fn qualifying_neighbors(&self, comid: Comid) -> Result<Vec<Comid>> {
        let edges = self.store.neighbors(comid, self.mode.direction())?;
        match self.mode {
            NavigationMode::UpstreamTributaries | NavigationMode::DownstreamDiversions => {
                Ok(edges.into_iter().map(|e| e.comid).collect())
            }
            NavigationMode::DownstreamMain => {
                let main: Vec<Comid> = edges
                    .into_iter()
                    .filter(|e| e.path == FlowPath::Main)
                    .map(|e| e.comid)
                    .collect();
                if main.len() > 1 {
                    return Err(Error::InconsistentNetwork(format!(
                        "{comid} has {} main downstream edges",
                        main.len()
                    )));
                }
                Ok(main)
            }
            NavigationMode::UpstreamMain => self.mainstem_upstream(comid, edges),
        }
    }

    /// The mainstem edge at an upstream junction is the one toward the
    /// largest contributing drainage. Equal drainage falls back to the
    /// smaller comid.
    fn mainstem_upstream(&self, comid: Comid, edges: Vec<FlowEdge>) -> Result<Vec<Comid>> {
        let mut best: Option<(f64, Comid)> = None;
        for edge in edges {
            let catchment = self.store.catchment(edge.comid)?.ok_or_else(|| {
                Error::InconsistentNetwork(format!(
                    "flow edge at {comid} references missing catchment {}",
                    edge.comid
                ))
            })?;
            let candidate = (catchment.drainage_sqkm, catchment.comid);
            best = Some(match best {
                None => candidate,
                Some((drainage, kept)) => {
                    if candidate.0 > drainage || (candidate.0 == drainage && candidate.1 < kept) {
                        candidate
                    } else {
                        (drainage, kept)
                    }
                }
            });
        }
        Ok(best.map(|(_, c)| vec![c]).unwrap_or_default())
    }
}

impl NavigationMode {
    /// Path modes follow a single edge per step; tree modes expand all.
    fn is_path(&self) -> bool {
        matches!(
            self,
            NavigationMode::UpstreamMain | NavigationMode::DownstreamMain
        )
    }
}
