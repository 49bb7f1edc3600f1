//! Learned overlay-edge statistics.

/// The weight set carried by one overlay edge.
///
/// `distance` is fixed at build time (shortest direct domain-level route).
/// `min_time` and `intensity` are learned during training and read-only
/// afterwards: `intensity` counts observed transits and only grows,
/// `min_time` records the fastest observed transit and only shrinks.
/// `min_time = None` means the edge has never been observed — the inference
/// handlers treat such edges as having no prior to act on.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct EdgeWeightSet {
    /// Length of the shortest direct path between the observed domains.
    pub distance: f64,

    /// Fastest observed transit across this edge, in ticks.
    pub min_time: Option<u64>,

    /// Number of observed transits.
    pub intensity: u64,
}

impl EdgeWeightSet {
    /// A freshly built edge: known distance, nothing learned yet.
    pub fn unobserved(distance: f64) -> Self {
        Self {
            distance,
            min_time:  None,
            intensity: 0,
        }
    }

    /// Record one observed transit that took `elapsed` ticks.
    pub fn observe_transit(&mut self, elapsed: u64) {
        self.intensity += 1;
        self.min_time = Some(match self.min_time {
            Some(best) => best.min(elapsed),
            None       => elapsed,
        });
    }
}
