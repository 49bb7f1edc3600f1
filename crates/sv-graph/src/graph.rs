//! The domain graph: undirected weighted adjacency plus per-vertex guest sets.

use rustc_hash::FxHashSet;

use sv_core::{DomainId, ObjectId};

use crate::{GraphError, GraphResult};

/// Undirected weighted graph over dense `DomainId` vertices.
///
/// Edge weights are geometric distances (positive reals).  Every vertex
/// carries a `guests` set of the objects currently resident there; the
/// invariant that an object appears in exactly one guest set at a time is
/// maintained by the caller (the mobility dispatcher), not enforced here.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DomainGraph {
    /// `adjacency[d]` lists `(neighbor, distance)` pairs.  Symmetric:
    /// every edge appears in both endpoints' lists with the same weight.
    adjacency: Vec<Vec<(DomainId, f64)>>,

    /// `guests[d]` is the set of objects currently resident in domain `d`.
    guests: Vec<FxHashSet<ObjectId>>,
}

impl DomainGraph {
    /// Construct a graph with `size` vertices and no edges.
    pub fn new(size: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); size],
            guests:    vec![FxHashSet::default(); size],
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn domain_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    #[inline]
    pub fn contains(&self, domain: DomainId) -> bool {
        domain.index() < self.adjacency.len()
    }

    /// All domain ids, in ascending order.
    pub fn domains(&self) -> impl Iterator<Item = DomainId> + '_ {
        (0..self.adjacency.len() as u32).map(DomainId)
    }

    // ── Edges ─────────────────────────────────────────────────────────────

    /// Insert an undirected edge with the given distance.
    ///
    /// Returns `false` (and leaves the graph unchanged) if the edge already
    /// exists.  Self-loops are rejected the same way.
    pub fn add_edge(&mut self, a: DomainId, b: DomainId, distance: f64) -> GraphResult<bool> {
        self.check(a)?;
        self.check(b)?;
        if a == b || self.contains_edge(a, b) {
            return Ok(false);
        }
        self.adjacency[a.index()].push((b, distance));
        self.adjacency[b.index()].push((a, distance));
        Ok(true)
    }

    pub fn contains_edge(&self, a: DomainId, b: DomainId) -> bool {
        self.contains(a)
            && self.contains(b)
            && self.adjacency[a.index()].iter().any(|&(n, _)| n == b)
    }

    /// Distance along the edge `(a, b)`.
    pub fn weight(&self, a: DomainId, b: DomainId) -> GraphResult<f64> {
        self.check(a)?;
        self.adjacency[a.index()]
            .iter()
            .find(|&&(n, _)| n == b)
            .map(|&(_, w)| w)
            .ok_or(GraphError::EdgeNotFound { a, b })
    }

    /// `(neighbor, distance)` pairs adjacent to `domain`.
    pub fn neighbors(&self, domain: DomainId) -> GraphResult<&[(DomainId, f64)]> {
        self.check(domain)?;
        Ok(&self.adjacency[domain.index()])
    }

    /// All edges as `(a, b, distance)` with `a < b`, each reported once.
    pub fn edges(&self) -> impl Iterator<Item = (DomainId, DomainId, f64)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(i, adj)| {
            let a = DomainId(i as u32);
            adj.iter()
                .filter(move |&&(b, _)| a < b)
                .map(move |&(b, w)| (a, b, w))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    // ── Guest sets ────────────────────────────────────────────────────────

    /// Read access to a domain's guest set — the overlay's "frame" source.
    pub fn guests(&self, domain: DomainId) -> GraphResult<&FxHashSet<ObjectId>> {
        self.check(domain)?;
        Ok(&self.guests[domain.index()])
    }

    /// Write access to a domain's guest set.  Reserved for the mobility
    /// dispatcher; overlay nodes must only read.
    pub fn guests_mut(&mut self, domain: DomainId) -> GraphResult<&mut FxHashSet<ObjectId>> {
        self.check(domain)?;
        Ok(&mut self.guests[domain.index()])
    }

    /// Empty every guest set (phase reset).
    pub fn clear_guests(&mut self) {
        for set in &mut self.guests {
            set.clear();
        }
    }

    #[inline]
    fn check(&self, domain: DomainId) -> GraphResult<()> {
        if self.contains(domain) {
            Ok(())
        } else {
            Err(GraphError::NodeNotFound(domain))
        }
    }
}
