//! Overlay derivation: coverage sampling and direct-route edge construction.

use sv_core::{DomainId, OverlayId, SimRng};
use sv_graph::{paths, DomainGraph};

use crate::{OverlayError, OverlayGraph, OverlayResult};

/// Builds the surveillance graph from a domain graph and a coverage ratio.
pub struct OverlayBuilder;

impl OverlayBuilder {
    /// Sample ⌈α·|V|⌉ observed domains uniformly without replacement; the
    /// sampled order defines the `OverlayId` ↔ domain bijection.
    pub fn sample_observed(
        graph: &DomainGraph,
        alpha: f64,
        rng:   &mut SimRng,
    ) -> OverlayResult<Vec<DomainId>> {
        if alpha <= 0.0 || alpha > 1.0 {
            return Err(OverlayError::Config(format!(
                "alpha must lie in (0, 1], got {alpha}"
            )));
        }
        let size = (alpha * graph.domain_count() as f64).ceil() as usize;
        let mut domains: Vec<DomainId> = graph.domains().collect();
        rng.shuffle(&mut domains);
        domains.truncate(size);
        Ok(domains)
    }

    /// Derive the overlay over a sampled observed set.
    pub fn build(
        graph: &DomainGraph,
        alpha: f64,
        rng:   &mut SimRng,
    ) -> OverlayResult<OverlayGraph> {
        let observed = Self::sample_observed(graph, alpha, rng)?;
        Self::build_from_observed(graph, &observed)
    }

    /// Derive the overlay for an explicit node ↦ domain assignment.
    ///
    /// Two overlay nodes are connected iff some simple path between their
    /// observed domains has an interior disjoint from the whole observed
    /// set — a route a target could take without a third node sighting it.
    /// The edge distance is the length of the shortest such path.
    pub fn build_from_observed(
        graph:    &DomainGraph,
        observed: &[DomainId],
    ) -> OverlayResult<OverlayGraph> {
        let mut overlay = OverlayGraph::new(observed);

        for x in 0..observed.len() {
            for y in 0..x {
                let candidates = paths::simple_paths(graph, observed[x], observed[y])?;
                let direct: Vec<_> = candidates
                    .into_iter()
                    .filter(|path| is_direct(path, observed))
                    .collect();
                if direct.is_empty() {
                    continue;
                }

                let mut shortest = f64::INFINITY;
                for path in &direct {
                    let length = paths::path_length(graph, path)?;
                    if length < shortest {
                        shortest = length;
                    }
                }
                overlay.add_edge(OverlayId(x as u32), OverlayId(y as u32), shortest);
            }
        }

        tracing::debug!(
            target: "overlay",
            nodes = overlay.node_count(),
            edges = overlay.edges.len(),
            "overlay derived"
        );
        Ok(overlay)
    }
}

/// A path is direct when none of its interior vertices is observed.
/// The endpoints are observed by definition and excluded from the check.
fn is_direct(path: &[DomainId], observed: &[DomainId]) -> bool {
    if path.len() <= 2 {
        return true;
    }
    path[1..path.len() - 1].iter().all(|v| !observed.contains(v))
}
