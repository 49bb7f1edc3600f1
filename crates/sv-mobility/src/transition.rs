//! Per-object transition matrices and their random synthesis.
//!
//! A transition matrix is a row-stochastic table over a subset of domains —
//! "the domains this object ever visits".  Rows are immutable after
//! construction; [`TransitionMatrix::validate`] enforces stochasticity within
//! numeric tolerance at setup.
//!
//! Synthesis follows two independent axes:
//!
//! - **group size** — how many domains an object roams: uniform, binomial,
//!   or geometric (the latter two rejection-sampled into range);
//! - **row shape** — plain-uniform, or truncated-geometric `base·qⁱ` with
//!   `base = (1−q)/(1−qⁿ)`, either peaked at the first column for every row
//!   (monopolar) or rotated per row so the peaks walk the diagonal
//!   (multipolar).

use rand_distr::{Binomial, Distribution, Geometric};
use rustc_hash::FxHashMap;

use sv_core::{DomainId, GroupSizeDistribution, SimRng, TransitionRowDistribution};

use crate::{MobilityError, MobilityResult};

/// Tolerance for row-sum validation.
const ROW_SUM_TOLERANCE: f64 = 1e-6;

/// Give up rejection sampling after this many failed draws.
const MAX_REJECTION_ATTEMPTS: usize = 100_000;

// ── TransitionMatrix ─────────────────────────────────────────────────────────

/// Row-stochastic transition table over an ordered subset of domains.
///
/// Column order matters: destination sampling walks the row in column order
/// accumulating probability mass (inverse CDF), so two matrices with the same
/// entries but different column orders draw identically-distributed but
/// differently-seeded destinations.
#[derive(Clone, Debug)]
pub struct TransitionMatrix {
    columns: Vec<DomainId>,
    rows:    FxHashMap<DomainId, Vec<f64>>,
}

impl TransitionMatrix {
    /// Construct a zeroed matrix over `columns`.  At least two domains are
    /// required — an object with a single reachable domain cannot move.
    pub fn new(columns: Vec<DomainId>) -> MobilityResult<Self> {
        if columns.len() < 2 {
            return Err(MobilityError::GroupTooSmall(columns.len()));
        }
        let rows = columns
            .iter()
            .map(|&src| (src, vec![0.0; columns.len()]))
            .collect();
        Ok(Self { columns, rows })
    }

    /// The ordered destination set.
    pub fn columns(&self) -> &[DomainId] {
        &self.columns
    }

    pub fn contains(&self, domain: DomainId) -> bool {
        self.rows.contains_key(&domain)
    }

    /// Set `Pr(next = dst | current = src)`.
    pub fn set(&mut self, src: DomainId, dst: DomainId, p: f64) -> MobilityResult<()> {
        let idx = self.column_index(dst)?;
        let row = self
            .rows
            .get_mut(&src)
            .ok_or(MobilityError::DomainNotInMatrix { domain: src })?;
        row[idx] = p;
        Ok(())
    }

    /// Read `Pr(next = dst | current = src)`.
    pub fn get(&self, src: DomainId, dst: DomainId) -> MobilityResult<f64> {
        let idx = self.column_index(dst)?;
        self.rows
            .get(&src)
            .map(|row| row[idx])
            .ok_or(MobilityError::DomainNotInMatrix { domain: src })
    }

    /// Verify every row sums to 1 within tolerance.
    pub fn validate(&self) -> MobilityResult<()> {
        for (&src, row) in &self.rows {
            let sum: f64 = row.iter().sum();
            if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
                return Err(MobilityError::NonStochasticRow { src, sum });
            }
        }
        Ok(())
    }

    /// Inverse-CDF destination draw: walk the `src` row in column order,
    /// accumulating until the mass reaches `u ∈ [0, 1)`.  A rounding tail
    /// (accumulated sum below `u`) falls through to the last column.
    pub fn sample_destination(&self, src: DomainId, u: f64) -> MobilityResult<DomainId> {
        let row = self
            .rows
            .get(&src)
            .ok_or(MobilityError::DomainNotInMatrix { domain: src })?;

        let mut chosen = self.columns.len() - 1;
        let mut acc = 0.0;
        for (i, &p) in row.iter().enumerate() {
            acc += p;
            if acc >= u {
                chosen = i;
                break;
            }
        }
        Ok(self.columns[chosen])
    }

    fn column_index(&self, domain: DomainId) -> MobilityResult<usize> {
        self.columns
            .iter()
            .position(|&c| c == domain)
            .ok_or(MobilityError::DomainNotInMatrix { domain })
    }
}

// ── TransitionGenerator ──────────────────────────────────────────────────────

/// Synthesises one transition matrix per object from a shared shuffled pool
/// of domains.
pub struct TransitionGenerator {
    /// All domains, shuffled once at construction.  Each generated group is a
    /// prefix of this pool, re-shuffled per matrix — overlapping groups share
    /// domains, which is what lets objects meet.
    domain_pool: Vec<DomainId>,

    min_group: usize,
    group_distribution: GroupSizeDistribution,
    row_distribution:   TransitionRowDistribution,
}

impl TransitionGenerator {
    pub fn new(
        domain_size: usize,
        min_group:   usize,
        group_distribution: GroupSizeDistribution,
        row_distribution:   TransitionRowDistribution,
        rng: &mut SimRng,
    ) -> Self {
        let mut domain_pool: Vec<DomainId> =
            (0..domain_size as u32).map(DomainId).collect();
        rng.shuffle(&mut domain_pool);
        Self {
            domain_pool,
            min_group,
            group_distribution,
            row_distribution,
        }
    }

    /// Generate `count` validated matrices.
    pub fn generate(
        &self,
        count: usize,
        rng:   &mut SimRng,
    ) -> MobilityResult<Vec<TransitionMatrix>> {
        let sizes = self.sample_group_sizes(count, rng)?;

        let mut matrices = Vec::with_capacity(count);
        for size in sizes {
            let mut group = self.domain_pool[..size].to_vec();
            rng.shuffle(&mut group);

            let mut matrix = TransitionMatrix::new(group.clone())?;
            for (row_index, &src) in group.iter().enumerate() {
                let probabilities = self.probability_row(group.len(), row_index)?;
                for (&dst, &p) in group.iter().zip(&probabilities) {
                    matrix.set(src, dst, p)?;
                }
            }
            matrix.validate()?;
            matrices.push(matrix);
        }
        Ok(matrices)
    }

    // ── Group sizes ───────────────────────────────────────────────────────

    fn sample_group_sizes(&self, count: usize, rng: &mut SimRng) -> MobilityResult<Vec<usize>> {
        let max = self.domain_pool.len();
        match self.group_distribution {
            GroupSizeDistribution::Plain => Ok((0..count)
                .map(|_| rng.gen_range(self.min_group..=max))
                .collect()),
            GroupSizeDistribution::Binomial { p } => {
                let dist = Binomial::new(max as u64, p)
                    .map_err(|e| MobilityError::Distribution(e.to_string()))?;
                self.rejection_sample(count, rng, |rng| dist.sample(rng.inner()) as usize)
            }
            GroupSizeDistribution::Geometric { p } => {
                let dist = Geometric::new(p)
                    .map_err(|e| MobilityError::Distribution(e.to_string()))?;
                // Geometric here counts failures before the first success;
                // shift by one for the 1-based support the group sizes use.
                self.rejection_sample(count, rng, |rng| dist.sample(rng.inner()) as usize + 1)
            }
        }
    }

    /// Draw until `count` samples land inside `[min_group, pool size]`.
    fn rejection_sample(
        &self,
        count:  usize,
        rng:    &mut SimRng,
        mut draw: impl FnMut(&mut SimRng) -> usize,
    ) -> MobilityResult<Vec<usize>> {
        let max = self.domain_pool.len();
        let mut out = Vec::with_capacity(count);
        let mut attempts = 0;
        while out.len() < count {
            attempts += 1;
            if attempts > MAX_REJECTION_ATTEMPTS {
                return Err(MobilityError::Distribution(
                    "group-size rejection sampling did not converge".into(),
                ));
            }
            let candidate = draw(rng);
            if (self.min_group..=max).contains(&candidate) {
                out.push(candidate);
            }
        }
        Ok(out)
    }

    // ── Probability rows ──────────────────────────────────────────────────

    fn probability_row(&self, n: usize, row_index: usize) -> MobilityResult<Vec<f64>> {
        match self.row_distribution {
            TransitionRowDistribution::Plain => Ok(vec![1.0 / n as f64; n]),
            TransitionRowDistribution::GeometricMonopolar { q } => geometric_row(n, q),
            TransitionRowDistribution::GeometricMultipolar { q } => {
                let mut row = geometric_row(n, q)?;
                row.rotate_right(row_index % n);
                Ok(row)
            }
        }
    }
}

/// Truncated geometric row `base·qⁱ` with `base = (1−q)/(1−qⁿ)`, which sums
/// to exactly 1 over `n` columns.
fn geometric_row(n: usize, q: f64) -> MobilityResult<Vec<f64>> {
    if !(0.0..1.0).contains(&q) || q == 0.0 {
        return Err(MobilityError::Distribution(format!(
            "geometric ratio q must lie in (0, 1), got {q}"
        )));
    }
    let base = (1.0 - q) / (1.0 - q.powi(n as i32));
    Ok((0..n).map(|i| base * q.powi(i as i32)).collect())
}
