//! Path oracles: Dijkstra shortest path and exhaustive simple-path
//! enumeration.
//!
//! Both operate on the vertex level and return ordered `DomainId` sequences.
//! The simple-path enumeration is exponential in the worst case; it is meant
//! for the small graphs the overlay builder works with (tens of vertices),
//! where exhaustive enumeration is cheap.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use sv_core::DomainId;

use crate::{DomainGraph, GraphError, GraphResult};

// ── Dijkstra ──────────────────────────────────────────────────────────────────

/// Heap entry ordered by cost, with the domain id as a deterministic
/// tie-breaker.  `f64` is not `Ord`, so the ordering goes through `total_cmp`;
/// costs are finite non-negative sums of edge weights.
#[derive(PartialEq)]
struct HeapEntry {
    cost: f64,
    node: DomainId,
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.node.cmp(&other.node))
    }
}

/// Shortest path from `src` to `dst` by summed edge distance.
///
/// Returns the ordered vertex sequence (starting with `src`, ending with
/// `dst`) and the total distance.  `src == dst` yields `([src], 0.0)`.
pub fn shortest_path(
    graph: &DomainGraph,
    src:   DomainId,
    dst:   DomainId,
) -> GraphResult<(Vec<DomainId>, f64)> {
    if !graph.contains(src) {
        return Err(GraphError::NodeNotFound(src));
    }
    if !graph.contains(dst) {
        return Err(GraphError::NodeNotFound(dst));
    }
    if src == dst {
        return Ok((vec![src], 0.0));
    }

    let n = graph.domain_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev = vec![DomainId::INVALID; n];
    dist[src.index()] = 0.0;

    let mut heap: BinaryHeap<Reverse<HeapEntry>> = BinaryHeap::new();
    heap.push(Reverse(HeapEntry { cost: 0.0, node: src }));

    while let Some(Reverse(HeapEntry { cost, node })) = heap.pop() {
        if node == dst {
            return Ok((reconstruct(prev, src, dst), cost));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for &(neighbor, weight) in graph.neighbors(node)? {
            let new_cost = cost + weight;
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev[neighbor.index()] = node;
                heap.push(Reverse(HeapEntry { cost: new_cost, node: neighbor }));
            }
        }
    }

    Err(GraphError::NoRoute { from: src, to: dst })
}

fn reconstruct(prev: Vec<DomainId>, src: DomainId, dst: DomainId) -> Vec<DomainId> {
    let mut path = vec![dst];
    let mut cur = dst;
    while cur != src {
        cur = prev[cur.index()];
        path.push(cur);
    }
    path.reverse();
    path
}

// ── Simple paths ──────────────────────────────────────────────────────────────

/// Every simple path from `src` to `dst` (no repeated vertex), as ordered
/// vertex sequences.  `src == dst` yields the single trivial path `[src]`.
pub fn simple_paths(
    graph: &DomainGraph,
    src:   DomainId,
    dst:   DomainId,
) -> GraphResult<Vec<Vec<DomainId>>> {
    if !graph.contains(src) {
        return Err(GraphError::NodeNotFound(src));
    }
    if !graph.contains(dst) {
        return Err(GraphError::NodeNotFound(dst));
    }

    let mut visited = vec![false; graph.domain_count()];
    let mut current = Vec::new();
    let mut paths = Vec::new();
    walk(graph, src, dst, &mut visited, &mut current, &mut paths)?;
    Ok(paths)
}

fn walk(
    graph:   &DomainGraph,
    at:      DomainId,
    dst:     DomainId,
    visited: &mut Vec<bool>,
    current: &mut Vec<DomainId>,
    paths:   &mut Vec<Vec<DomainId>>,
) -> GraphResult<()> {
    visited[at.index()] = true;
    current.push(at);

    if at == dst {
        paths.push(current.clone());
    } else {
        for &(neighbor, _) in graph.neighbors(at)? {
            if !visited[neighbor.index()] {
                walk(graph, neighbor, dst, visited, current, paths)?;
            }
        }
    }

    current.pop();
    visited[at.index()] = false;
    Ok(())
}

// ── Path length ───────────────────────────────────────────────────────────────

/// Sum of edge distances along a vertex sequence.
///
/// Errors with [`GraphError::EdgeNotFound`] if two consecutive vertices are
/// not adjacent.
pub fn path_length(graph: &DomainGraph, path: &[DomainId]) -> GraphResult<f64> {
    path.windows(2)
        .map(|pair| graph.weight(pair[0], pair[1]))
        .sum()
}
