//! Fluent builder for constructing a [`Sim`].

use rustc_hash::FxHashSet;

use sv_core::{DomainId, ObjectId, ObjectRng, SimConfig, SimRng};
use sv_graph::{DomainGraph, GraphGenerator};
use sv_mobility::{
    sample_average_speeds, MobileObject, MobilityDispatcher, TaskGenerator,
    TransitionGenerator, TransitionMatrix,
};
use sv_overlay::{
    OverlayResult, ReferenceSurveillance, SpatioTemporalSurveillance, SurveillanceSystem,
};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<S>`].
///
/// # Required input
///
/// A validated [`SimConfig`].  Everything else has a generated default:
///
/// | Method            | Default                                          |
/// |-------------------|--------------------------------------------------|
/// | `.graph(g)`       | Random connected graph per the config            |
/// | `.matrices(m)`    | Synthesised by [`TransitionGenerator`]           |
/// | `.speeds(v)`      | Normal draws per the config, positives only      |
/// | `.start_domains(v)` | First column of each object's matrix           |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .graph(my_graph)
///     .build_adaptive()?;
/// ```
pub struct SimBuilder {
    config:        SimConfig,
    graph:         Option<DomainGraph>,
    matrices:      Option<Vec<TransitionMatrix>>,
    speeds:        Option<Vec<f64>>,
    start_domains: Option<Vec<DomainId>>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            graph:         None,
            matrices:      None,
            speeds:        None,
            start_domains: None,
        }
    }

    /// Supply the domain graph instead of generating one.
    pub fn graph(mut self, graph: DomainGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Supply per-object transition matrices (must be length `objects_count`).
    pub fn matrices(mut self, matrices: Vec<TransitionMatrix>) -> Self {
        self.matrices = Some(matrices);
        self
    }

    /// Supply per-object average speeds (must be length `objects_count`).
    pub fn speeds(mut self, speeds: Vec<f64>) -> Self {
        self.speeds = Some(speeds);
        self
    }

    /// Supply per-object start domains (must be length `objects_count`).
    ///
    /// If not called, each object starts at the first column of its
    /// transition matrix, which guarantees the start lies inside the
    /// object's roaming set.
    pub fn start_domains(mut self, domains: Vec<DomainId>) -> Self {
        self.start_domains = Some(domains);
        self
    }

    // ── Convenience builds ────────────────────────────────────────────────

    /// Build with the adaptive overlay sampled at `config.alpha`.
    pub fn build_adaptive(self) -> SimResult<Sim<SpatioTemporalSurveillance>> {
        let alpha = self.config.alpha;
        self.build_with(|graph, targets, rng| {
            SpatioTemporalSurveillance::new(graph, alpha, targets.clone(), rng)
        })
    }

    /// Build with the always-on reference system sampled at `config.alpha`.
    pub fn build_reference(self) -> SimResult<Sim<ReferenceSurveillance>> {
        let alpha = self.config.alpha;
        self.build_with(|graph, targets, rng| {
            ReferenceSurveillance::new(graph, alpha, targets.clone(), rng)
        })
    }

    /// Validate the configuration, assemble the world, and let `make`
    /// construct the surveillance system over the finished domain graph.
    pub fn build_with<S, F>(self, make: F) -> SimResult<Sim<S>>
    where
        S: SurveillanceSystem,
        F: FnOnce(&DomainGraph, &FxHashSet<ObjectId>, &mut SimRng) -> OverlayResult<S>,
    {
        let config = self.config;
        config.validate()?;

        let mut rng = SimRng::new(config.seed);

        // ── World: domain graph ───────────────────────────────────────────
        let graph = match self.graph {
            Some(g) => g,
            None => GraphGenerator::generate(
                config.domain_size,
                config.min_weight,
                config.max_weight,
                &mut rng,
            ),
        };

        // ── Population: matrices, speeds, start positions ─────────────────
        let matrices = match self.matrices {
            Some(m) => {
                if m.len() != config.objects_count {
                    return Err(SimError::ObjectCountMismatch {
                        expected: config.objects_count,
                        got:      m.len(),
                        what:     "transition matrices",
                    });
                }
                for matrix in &m {
                    matrix.validate()?;
                }
                m
            }
            None => {
                let generator = TransitionGenerator::new(
                    graph.domain_count(),
                    config.min_transition_group_size,
                    config.transition_group_distribution,
                    config.transition_probabilities_distribution,
                    &mut rng,
                );
                generator.generate(config.objects_count, &mut rng)?
            }
        };

        let speeds = match self.speeds {
            Some(s) => {
                if s.len() != config.objects_count {
                    return Err(SimError::ObjectCountMismatch {
                        expected: config.objects_count,
                        got:      s.len(),
                        what:     "object speeds",
                    });
                }
                s
            }
            None => sample_average_speeds(
                config.object_speed_exp,
                config.object_speed_sigma,
                config.objects_count,
                &mut rng,
            )?,
        };

        let start_domains = match self.start_domains {
            Some(d) => {
                if d.len() != config.objects_count {
                    return Err(SimError::ObjectCountMismatch {
                        expected: config.objects_count,
                        got:      d.len(),
                        what:     "start domains",
                    });
                }
                d
            }
            None => matrices.iter().map(|m| m.columns()[0]).collect(),
        };

        // ── Targets and the surveillance system ───────────────────────────
        let targets: FxHashSet<ObjectId> = (0..config.surveillance_target_count as u32)
            .map(ObjectId)
            .collect();
        let surveillance = make(&graph, &targets, &mut rng)?;

        // ── Dispatcher, objects, placement ────────────────────────────────
        let generator =
            TaskGenerator::new(matrices, config.moving_degree, config.max_await);
        let mut dispatcher =
            MobilityDispatcher::new(graph, generator, config.objects_count);

        let mut objects = Vec::with_capacity(config.objects_count);
        let mut rngs = Vec::with_capacity(config.objects_count);
        for (i, (&start, &speed)) in start_domains.iter().zip(&speeds).enumerate() {
            let id = ObjectId(i as u32);
            objects.push(MobileObject::new(id, start, speed, config.time_step));
            rngs.push(ObjectRng::new(config.seed, id));
            dispatcher.place(id, start)?;
        }

        Ok(Sim {
            clock: config.make_clock(),
            config,
            dispatcher,
            objects,
            rngs,
            surveillance,
            targets,
        })
    }
}
