//! The overlay graph: observation nodes, shared edge cells, adjacency.
//!
//! Edges are undirected and their weight sets are *shared*: the weights live
//! in a single `OverlayEdge` cell indexed by `EdgeId`, and both endpoints'
//! adjacency entries point at the same cell.  Never duplicate a weight set —
//! the symmetry of `min_time`/`intensity` across the two endpoints is
//! load-bearing for the activation protocol.

use sv_core::{DomainId, EdgeId, OverlayId};

use crate::{EdgeWeightSet, OverlayError, OverlayNode, OverlayResult};

/// One undirected overlay edge and its shared weight cell.
#[derive(Clone, Debug)]
pub struct OverlayEdge {
    pub a:       OverlayId,
    pub b:       OverlayId,
    pub weights: EdgeWeightSet,
}

/// A row of the learned edge table — the training artifact.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRecord {
    pub src:       OverlayId,
    pub dst:       OverlayId,
    pub distance:  f64,
    pub intensity: u64,
    pub min_time:  Option<u64>,
}

/// The derived surveillance graph.
///
/// Fields are `pub` so the controller can split-borrow nodes, edges, and
/// adjacency independently during the tick loop.
pub struct OverlayGraph {
    /// Observation nodes, indexed by `OverlayId`.
    pub nodes: Vec<OverlayNode>,

    /// Shared edge cells, indexed by `EdgeId`.
    pub edges: Vec<OverlayEdge>,

    /// `adjacency[n]` lists `(neighbor, edge)` pairs for node `n`.
    pub adjacency: Vec<Vec<(OverlayId, EdgeId)>>,
}

impl OverlayGraph {
    /// A graph of `size` unconnected nodes, each observing its assigned
    /// domain.
    pub fn new(observed: &[DomainId]) -> Self {
        let nodes = observed
            .iter()
            .enumerate()
            .map(|(i, &domain)| OverlayNode::new(OverlayId(i as u32), domain))
            .collect();
        Self {
            nodes,
            edges: Vec::new(),
            adjacency: vec![Vec::new(); observed.len()],
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Connect `a` and `b` with a fresh unobserved weight cell.
    pub fn add_edge(&mut self, a: OverlayId, b: OverlayId, distance: f64) {
        let edge = EdgeId(self.edges.len() as u32);
        self.edges.push(OverlayEdge {
            a,
            b,
            weights: EdgeWeightSet::unobserved(distance),
        });
        self.adjacency[a.index()].push((b, edge));
        self.adjacency[b.index()].push((a, edge));
    }

    /// `(neighbor, edge)` pairs adjacent to `node`.
    pub fn neighbors(&self, node: OverlayId) -> &[(OverlayId, EdgeId)] {
        &self.adjacency[node.index()]
    }

    /// The edge between two nodes, if connected.
    pub fn edge_between(&self, a: OverlayId, b: OverlayId) -> Option<EdgeId> {
        self.adjacency[a.index()]
            .iter()
            .find(|&&(n, _)| n == b)
            .map(|&(_, e)| e)
    }

    /// Shared read access to the weight set between two nodes.
    pub fn weight(&self, a: OverlayId, b: OverlayId) -> OverlayResult<&EdgeWeightSet> {
        self.edge_between(a, b)
            .map(|e| &self.edges[e.index()].weights)
            .ok_or(OverlayError::MissingEdge { a, b })
    }

    /// The learned edge table, one record per undirected edge.
    pub fn edge_records(&self) -> Vec<EdgeRecord> {
        self.edges
            .iter()
            .map(|e| EdgeRecord {
                src:       e.a,
                dst:       e.b,
                distance:  e.weights.distance,
                intensity: e.weights.intensity,
                min_time:  e.weights.min_time,
            })
            .collect()
    }
}
