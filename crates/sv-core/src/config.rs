//! Top-level simulation configuration.
//!
//! One `SimConfig` describes a full experiment: the domain graph to generate,
//! the object population and its mobility statistics, and the surveillance
//! overlay coverage.  Typically constructed in code by the application crate
//! (or deserialized from TOML/JSON with the `serde` feature) and validated
//! once at setup — every downstream component may assume a valid config.

use crate::{CoreError, CoreResult};

// ── Distribution selectors ────────────────────────────────────────────────────

/// How per-object transition-domain group sizes are drawn.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupSizeDistribution {
    /// Uniform integer in `[min_group, domain_size]`.
    #[default]
    Plain,
    /// Binomial(`domain_size`, p), rejection-sampled into range.
    Binomial { p: f64 },
    /// Geometric(p), rejection-sampled into range.
    Geometric { p: f64 },
}

/// Shape of each row of a transition matrix.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionRowDistribution {
    /// Every destination equally likely.
    #[default]
    Plain,
    /// Truncated geometric `base·qⁱ`, always peaked at the first column.
    GeometricMonopolar { q: f64 },
    /// Truncated geometric, rotated so each row peaks at a different column.
    GeometricMultipolar { q: f64 },
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Simulation knobs.  See the field docs for units and valid ranges;
/// [`validate`](SimConfig::validate) enforces them at setup.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Total ticks to run a phase (training or inference).
    pub time_limit: u64,

    /// Physical seconds per tick.  Only object kinematics consume this.
    pub time_step: f64,

    /// Number of domains |V| in the generated spatial graph.
    pub domain_size: usize,

    /// Edge-distance range for graph generation.
    pub min_weight: u64,
    pub max_weight: u64,

    /// Number of simulated mobile objects.
    pub objects_count: usize,

    /// Mean and sigma of the normal distribution object speeds are drawn
    /// from (non-positive samples are rejected).
    pub object_speed_exp:   f64,
    pub object_speed_sigma: f64,

    /// Bernoulli probability that a freshly issued task is a Move
    /// (otherwise a Wait).  Must lie in `[0, 1]`.
    pub moving_degree: f64,

    /// Upper bound (inclusive) of a Wait task's timeout in ticks.  ≥ 1.
    pub max_await: u64,

    /// Minimum number of domains in an object's transition group.  ≥ 2.
    pub min_transition_group_size: usize,

    /// How transition-group sizes are drawn.
    pub transition_group_distribution: GroupSizeDistribution,

    /// Shape of the transition-probability rows.
    pub transition_probabilities_distribution: TransitionRowDistribution,

    /// Overlay coverage ratio |V_H| / |V|.  Must lie in `(0, 1]`.
    pub alpha: f64,

    /// How many of the objects are declared tracking targets.
    pub surveillance_target_count: usize,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl SimConfig {
    /// Check every range constraint, returning the first violation as a
    /// [`CoreError::Config`].
    pub fn validate(&self) -> CoreResult<()> {
        if self.alpha <= 0.0 || self.alpha > 1.0 {
            return Err(CoreError::Config(format!(
                "alpha must lie in (0, 1], got {}",
                self.alpha
            )));
        }
        if self.domain_size < 2 {
            return Err(CoreError::Config(format!(
                "domain_size must be at least 2, got {}",
                self.domain_size
            )));
        }
        if self.min_transition_group_size < 2 {
            return Err(CoreError::Config(format!(
                "min_transition_group_size must be at least 2, got {}",
                self.min_transition_group_size
            )));
        }
        if self.min_transition_group_size > self.domain_size {
            return Err(CoreError::Config(format!(
                "min_transition_group_size ({}) exceeds domain_size ({})",
                self.min_transition_group_size, self.domain_size
            )));
        }
        if !(0.0..=1.0).contains(&self.moving_degree) {
            return Err(CoreError::Config(format!(
                "moving_degree must lie in [0, 1], got {}",
                self.moving_degree
            )));
        }
        if self.max_await < 1 {
            return Err(CoreError::Config("max_await must be at least 1".into()));
        }
        if self.min_weight > self.max_weight || self.min_weight == 0 {
            return Err(CoreError::Config(format!(
                "edge-weight range [{}, {}] is invalid",
                self.min_weight, self.max_weight
            )));
        }
        if self.surveillance_target_count > self.objects_count {
            return Err(CoreError::Config(format!(
                "surveillance_target_count ({}) exceeds objects_count ({})",
                self.surveillance_target_count, self.objects_count
            )));
        }
        if self.time_step <= 0.0 {
            return Err(CoreError::Config("time_step must be positive".into()));
        }
        Ok(())
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> crate::SimClock {
        crate::SimClock::new(self.time_step)
    }
}
