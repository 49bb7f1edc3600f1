//! Random connected weighted graph synthesis.
//!
//! The construction guarantees connectivity with a spanning chain
//! `0—1—…—n-1`, then sprinkles extra random edges until the drawn edge
//! budget is spent.  Weights are uniform integers in `[min_weight,
//! max_weight]`, stored as `f64` distances.

use sv_core::{DomainId, SimRng};

use crate::DomainGraph;

/// Stateless generator; all randomness comes through the passed-in [`SimRng`].
pub struct GraphGenerator;

impl GraphGenerator {
    /// Generate a connected weighted graph with `size` domains.
    ///
    /// The total edge count is drawn uniformly from
    /// `[size − 1, size·(size − 1)/2]`; the lower bound is the spanning
    /// chain, the upper bound the complete graph.
    pub fn generate(size: usize, min_weight: u64, max_weight: u64, rng: &mut SimRng) -> DomainGraph {
        let mut graph = DomainGraph::new(size);
        if size < 2 {
            return graph;
        }

        let min_edges = size - 1;
        let max_edges = size * (size - 1) / 2;
        let mut budget = rng.gen_range(min_edges..=max_edges);

        // Spanning chain keeps the graph connected by construction.
        for i in 0..size - 1 {
            let w = rng.gen_range(min_weight..=max_weight) as f64;
            graph
                .add_edge(DomainId(i as u32), DomainId(i as u32 + 1), w)
                .expect("chain vertices exist by construction");
        }
        budget -= min_edges;

        // Remaining budget: random pairs, skipping duplicates and loops.
        // The pool of absent edges shrinks each round, so this terminates.
        let mut pool: Vec<(DomainId, DomainId)> = (0..size as u32)
            .flat_map(|a| (a + 1..size as u32).map(move |b| (DomainId(a), DomainId(b))))
            .filter(|&(a, b)| !graph.contains_edge(a, b))
            .collect();
        rng.shuffle(&mut pool);

        for (a, b) in pool.into_iter().take(budget) {
            let w = rng.gen_range(min_weight..=max_weight) as f64;
            graph
                .add_edge(a, b, w)
                .expect("pool pairs are valid non-edges");
        }

        tracing::debug!(
            target: "graph",
            domains = size,
            edges = graph.edge_count(),
            "generated domain graph"
        );
        graph
    }
}
